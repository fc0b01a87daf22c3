use chain_hash::ChainedHashTable;
use chain_hash::HashCode;
use clap::Parser;
use clap::ValueEnum;

#[derive(Copy, Clone, Debug, ValueEnum)]
enum KeyShape {
    /// Sequential integers 0..count
    Sequential,
    /// Employee identifiers EMP00001..
    Employee,
    /// Integers stepping by 65536, so every low half is zero
    Strided,
}

#[derive(Parser, Debug)]
struct Args {
    #[arg(short = 'c', long = "count", default_value_t = 1_000_000)]
    count: u64,

    #[arg(short = 'k', long = "keys", value_enum, default_value_t = KeyShape::Sequential)]
    keys: KeyShape,
}

fn fill<K: HashCode + Eq>(keys: impl Iterator<Item = K>) -> ChainedHashTable<K, u64> {
    keys.zip(0..).collect()
}

fn report<K>(table: &ChainedHashTable<K, u64>) {
    println!("Inserted {} keys into {} buckets", table.len(), table.capacity());
    table.print_chain_histogram();
    table.stats().print();
}

fn main() {
    let args = Args::parse();

    println!("Filling table with {} {:?} keys...", args.count, args.keys);

    match args.keys {
        KeyShape::Sequential => report(&fill(0..args.count)),
        KeyShape::Employee => report(&fill((1..=args.count).map(|n| format!("EMP{n:05}")))),
        KeyShape::Strided => report(&fill((0..args.count).map(|n| n << 16))),
    }
}

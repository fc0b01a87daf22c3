use alloc::boxed::Box;
use alloc::string::String;

/// A deterministic 32-bit hash code for keys stored in a
/// [`ChainedHashTable`](crate::ChainedHashTable).
///
/// Unlike [`core::hash::Hash`], the value produced here is part of the
/// table's contract: it is the same on every platform and across runs, so a
/// key always resolves to the same bucket. Implementations must agree with
/// `Eq`: equal keys must produce equal hash codes. Borrowed forms of a key
/// (for example `str` for `String`) must produce the same code as the owned
/// form.
///
/// A constant implementation is legal. It collapses every entry into a single
/// chain and turns every operation into a linear scan, but it never makes an
/// operation fail.
///
/// # Examples
///
/// ```rust
/// use chain_hash::HashCode;
///
/// assert_eq!(42u32.hash_code(), 42);
/// assert_eq!(None::<u32>.hash_code(), 0);
/// assert_eq!("EMP00001".hash_code(), String::from("EMP00001").hash_code());
/// ```
pub trait HashCode {
    /// Returns the hash code of `self`.
    fn hash_code(&self) -> u32;
}

macro_rules! impl_narrow {
    ($($t:ty),*) => {
        $(
            impl HashCode for $t {
                #[inline]
                fn hash_code(&self) -> u32 {
                    *self as u32
                }
            }
        )*
    };
}

// Sign extension is intentional for the signed types: -1i8 and -1i32 share a
// code, matching their numeric value.
impl_narrow!(u8, u16, u32, i8, i16, i32);

macro_rules! impl_wide {
    ($($t:ty),*) => {
        $(
            impl HashCode for $t {
                #[inline]
                fn hash_code(&self) -> u32 {
                    let v = *self as u64;
                    (v ^ (v >> 32)) as u32
                }
            }
        )*
    };
}

impl_wide!(u64, i64, usize, isize);

impl HashCode for bool {
    #[inline]
    fn hash_code(&self) -> u32 {
        if *self { 1231 } else { 1237 }
    }
}

impl HashCode for char {
    #[inline]
    fn hash_code(&self) -> u32 {
        *self as u32
    }
}

/// Strings hash their UTF-8 bytes with XXH3-64 (seed 0) and fold the digest to
/// 32 bits by XOR-ing its halves.
impl HashCode for str {
    #[inline]
    fn hash_code(&self) -> u32 {
        let digest = xxhash_rust::xxh3::xxh3_64(self.as_bytes());
        (digest ^ (digest >> 32)) as u32
    }
}

impl HashCode for String {
    #[inline]
    fn hash_code(&self) -> u32 {
        self.as_str().hash_code()
    }
}

impl HashCode for Box<str> {
    #[inline]
    fn hash_code(&self) -> u32 {
        (**self).hash_code()
    }
}

/// `None` is the null key. Its code is `0`, which always lands in bucket 0.
impl<T: HashCode> HashCode for Option<T> {
    #[inline]
    fn hash_code(&self) -> u32 {
        match self {
            Some(value) => value.hash_code(),
            None => 0,
        }
    }
}

impl<T: HashCode + ?Sized> HashCode for &T {
    #[inline]
    fn hash_code(&self) -> u32 {
        (**self).hash_code()
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn integers_hash_to_their_value() {
        assert_eq!(0u32.hash_code(), 0);
        assert_eq!(65_535u16.hash_code(), 65_535);
        assert_eq!(7i32.hash_code(), 7);
        assert_eq!((-1i32).hash_code(), u32::MAX);
        assert_eq!((-1i8).hash_code(), (-1i32).hash_code());
    }

    #[test]
    fn wide_integers_fold_upper_half() {
        assert_eq!(5u64.hash_code(), 5);
        assert_eq!((1u64 << 32).hash_code(), 1);
        assert_eq!(((3u64 << 32) | 3).hash_code(), 0);
        assert_eq!((-1i64).hash_code(), 0);
        assert_eq!(123usize.hash_code(), 123u64.hash_code());
    }

    #[test]
    fn strings_are_value_based() {
        let owned = "EMP00042".to_string();
        assert_eq!(owned.hash_code(), "EMP00042".hash_code());
        assert_eq!(Box::<str>::from("EMP00042").hash_code(), owned.hash_code());
        assert_ne!("EMP00042".hash_code(), "EMP00043".hash_code());
    }

    #[test]
    fn string_hash_is_stable() {
        let digest = xxhash_rust::xxh3::xxh3_64(b"");
        assert_eq!("".hash_code(), (digest ^ (digest >> 32)) as u32);
    }

    #[test]
    fn null_key_is_zero() {
        assert_eq!(None::<String>.hash_code(), 0);
        assert_eq!(Some(17u32).hash_code(), 17);
        assert_eq!(Some("a").hash_code(), "a".hash_code());
    }

    #[test]
    fn references_forward() {
        let key = 99u64;
        assert_eq!((&key).hash_code(), key.hash_code());
        assert_eq!(true.hash_code(), 1231);
        assert_eq!('A'.hash_code(), 65);
    }
}

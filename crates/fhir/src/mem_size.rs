use rust_decimal::Decimal;

/// Structural size estimate of an element tree in bytes.
///
/// Scalars count their own size, strings their byte length, absent optional
/// values nothing, and containers the sum of their items. The figure does not
/// depend on allocator behaviour or padding, so equal trees always report the
/// same size.
pub trait MemSize {
    fn mem_size(&self) -> usize;
}

macro_rules! impl_scalar_mem_size {
    ($($ty:ty),* $(,)?) => {
        $(
            impl MemSize for $ty {
                fn mem_size(&self) -> usize {
                    std::mem::size_of::<$ty>()
                }
            }
        )*
    };
}

impl_scalar_mem_size!(bool, i32, u32, i64, u64, usize, Decimal);

impl MemSize for String {
    fn mem_size(&self) -> usize {
        self.len()
    }
}

impl<T: MemSize> MemSize for Option<T> {
    fn mem_size(&self) -> usize {
        self.as_ref().map_or(0, MemSize::mem_size)
    }
}

impl<T: MemSize> MemSize for Vec<T> {
    fn mem_size(&self) -> usize {
        self.iter().map(MemSize::mem_size).sum()
    }
}

impl<T: MemSize + ?Sized> MemSize for Box<T> {
    fn mem_size(&self) -> usize {
        (**self).mem_size()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_structural_sizes() {
        assert_eq!("abc".to_string().mem_size(), 3);
        assert_eq!(None::<String>.mem_size(), 0);
        assert_eq!(Some(7i32).mem_size(), 4);
        assert_eq!(vec!["ab".to_string(), "c".to_string()].mem_size(), 3);
        assert_eq!(Box::new(true).mem_size(), 1);
    }
}

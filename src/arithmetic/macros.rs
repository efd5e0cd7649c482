#[doc(hidden)]
#[macro_export]
macro_rules! __bigint_impl_from {
    ($($type:ty),*$(,)?) => {
        $(
        impl From<$type> for BigInt {
            fn from(x: $type) -> Self {
                BN::from(x).wrap()
            }
        }
        )*
    };
}

/// Forwards a binary operator to `num-bigint`.
///
/// `Add add` covers every owned/borrowed pair of `BigInt` operands; `Shr shr usize` takes a
/// primitive right-hand side.
#[doc(hidden)]
#[macro_export]
macro_rules! __bigint_impl_ops {
    () => {};
    ($op: ident $func:ident, $($rest:tt)*) => {
        $crate::__bigint_impl_ops!(@pair $op $func, &BigInt, &BigInt, inner_ref, inner_ref);
        $crate::__bigint_impl_ops!(@pair $op $func, BigInt, BigInt, into_inner, into_inner);
        $crate::__bigint_impl_ops!(@pair $op $func, &BigInt, BigInt, inner_ref, into_inner);
        $crate::__bigint_impl_ops!(@pair $op $func, BigInt, &BigInt, into_inner, inner_ref);
        $crate::__bigint_impl_ops!{ $($rest)* }
    };
    ($op: ident $func:ident $primitive:ty, $($rest:tt)*) => {
        impl ops::$op<$primitive> for BigInt {
            type Output = BigInt;
            fn $func(self, rhs: $primitive) -> Self::Output {
                ops::$op::$func(self.into_inner(), rhs).wrap()
            }
        }
        impl ops::$op<$primitive> for &BigInt {
            type Output = BigInt;
            fn $func(self, rhs: $primitive) -> Self::Output {
                ops::$op::$func(self.inner_ref(), rhs).wrap()
            }
        }
        $crate::__bigint_impl_ops!{ $($rest)* }
    };
    (@pair $op: ident $func:ident, $lhs:ty, $rhs:ty, $lhs_num:ident, $rhs_num:ident) => {
        impl ops::$op<$rhs> for $lhs {
            type Output = BigInt;
            fn $func(self, rhs: $rhs) -> Self::Output {
                ops::$op::$func(self.$lhs_num(), rhs.$rhs_num()).wrap()
            }
        }
    };
}

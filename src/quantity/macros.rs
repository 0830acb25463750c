/// Declare a unit newtype. Only `f64` and `i64` are supported as the inner value.
macro_rules! quantity {
    ($name:ident, f64, $unit:literal) => {
        quantity!(@newtype $name, f64, $unit);
        float_total_order!($name);
    };

    ($name:ident, i64, $unit:literal) => {
        quantity!(@newtype $name, i64, $unit, Eq, Ord, PartialEq, PartialOrd);
    };

    (@newtype $name:ident, $inner:ty, $unit:literal $(, $derive:ident)*) => {
        #[repr(transparent)]
        #[derive(
            ::derive_more::Sub,
            ::serde::Serialize,
            ::std::clone::Clone,
            ::std::marker::Copy,
            $($derive,)*
        )]
        #[serde(transparent)]
        pub struct $name(pub $inner);

        /// Precision and width are forwarded to the inner value.
        impl ::std::fmt::Display for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(&self.0, formatter)?;
                write!(formatter, "{}", $unit)
            }
        }

        impl ::std::fmt::Debug for $name {
            fn fmt(&self, formatter: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Debug::fmt(&self.0, formatter)?;
                write!(formatter, "{}", $unit.trim_start())
            }
        }

        impl $name {
            #[allow(dead_code)]
            pub const ZERO: Self = Self(0 as $inner);
        }
    };
}

/// `f64` has no total order, so compare through [`ordered_float::OrderedFloat`] where `-0 == 0`.
macro_rules! float_total_order {
    ($name:ident) => {
        impl ::std::cmp::Ord for $name {
            fn cmp(&self, other: &Self) -> ::std::cmp::Ordering {
                ::ordered_float::OrderedFloat(self.0).cmp(&::ordered_float::OrderedFloat(other.0))
            }
        }

        impl ::std::cmp::PartialOrd for $name {
            fn partial_cmp(&self, other: &Self) -> Option<::std::cmp::Ordering> {
                Some(self.cmp(other))
            }
        }

        impl ::std::cmp::PartialEq for $name {
            fn eq(&self, other: &Self) -> bool {
                self.cmp(other).is_eq()
            }
        }

        impl ::std::cmp::Eq for $name {}
    };
}

//! `define_port_error!` declares a port error enum.
//!
//! Every variant carries named fields and a display message; the macro adds
//! the `thiserror` derive plus one snake_case constructor per variant whose
//! parameters accept `impl Into<FieldType>`.

macro_rules! define_port_error {
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident { $($field:ident : $ty:ty),* $(,)? } => $message:literal
            ),+ $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant { $($field: $ty),* },
            )+
        }

        ::paste::paste! {
            impl $name {
                $(
                    pub fn [<$variant:snake>]($($field: impl Into<$ty>),*) -> Self {
                        Self::$variant { $($field: $field.into()),* }
                    }
                )+
            }
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    define_port_error! {
        pub enum SamplePortError {
            Unreachable { message: String } => "unreachable: {message}",
            Conflict { attempts: u32 } => "conflict after {attempts} attempts",
            Mixed { message: String, attempts: u32 } => "{message} ({attempts})",
        }
    }

    #[test]
    fn string_fields_accept_str() {
        let err = SamplePortError::unreachable("db down");
        assert_eq!(err.to_string(), "unreachable: db down");
    }

    #[test]
    fn non_string_fields_keep_their_type() {
        let err = SamplePortError::conflict(3_u32);
        assert_eq!(err, SamplePortError::Conflict { attempts: 3 });
        assert_eq!(err.to_string(), "conflict after 3 attempts");
    }

    #[test]
    fn multiple_fields_are_forwarded_in_order() {
        let err = SamplePortError::mixed("retry", 2_u32);
        assert_eq!(err.to_string(), "retry (2)");
    }
}

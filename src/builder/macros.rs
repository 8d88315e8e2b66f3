//! Macros for ergonomic subject declaration.

/// Declare a struct and generate its [`Subject`](crate::core::Subject)
/// implementation.
///
/// Every field becomes readable and writable by its name. Field types must
/// implement `serde::Serialize` and `serde::de::DeserializeOwned`; `Option`
/// fields read as `null` when `None`.
///
/// # Example
///
/// ```
/// use warden::core::Subject;
/// use warden::subject;
///
/// subject! {
///     #[derive(Clone, Debug, Default)]
///     pub struct Order {
///         pub state: String,
///         pub consumer: Option<u64>,
///         pub payment: Option<String>,
///     }
/// }
///
/// let mut order = Order { state: "initial".into(), ..Order::default() };
/// assert_eq!(order.field("payment"), Some(warden::Value::Null));
///
/// order.set_field("state", "paid".into()).unwrap();
/// assert_eq!(order.state, "paid");
/// assert!(order.set_field("missing", "x".into()).is_err());
/// ```
#[macro_export]
macro_rules! subject {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$field_meta:meta])*
                $field_vis:vis $field:ident : $ty:ty
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        $vis struct $name {
            $(
                $(#[$field_meta])*
                $field_vis $field: $ty
            ),*
        }

        impl $crate::core::Subject for $name {
            fn field(&self, name: &str) -> ::core::option::Option<$crate::Value> {
                match name {
                    $(stringify!($field) => $crate::__private::serde_json::to_value(&self.$field).ok(),)*
                    _ => ::core::option::Option::None,
                }
            }

            fn set_field(
                &mut self,
                name: &str,
                value: $crate::Value,
            ) -> ::core::result::Result<(), $crate::core::FieldError> {
                match name {
                    $(stringify!($field) => {
                        self.$field = $crate::__private::serde_json::from_value(value).map_err(|err| {
                            $crate::core::FieldError::Rejected {
                                field: name.to_string(),
                                reason: err.to_string(),
                            }
                        })?;
                        ::core::result::Result::Ok(())
                    })*
                    _ => ::core::result::Result::Err($crate::core::FieldError::Unknown {
                        field: name.to_string(),
                    }),
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::{FieldError, Subject};
    use serde_json::json;

    crate::subject! {
        #[derive(Clone, Debug, Default, PartialEq)]
        struct Ticket {
            state: String,
            assignee: Option<u64>,
            labels: Vec<String>,
        }
    }

    #[test]
    fn subject_macro_reads_fields_by_name() {
        let ticket = Ticket {
            state: "open".into(),
            assignee: Some(7),
            labels: vec!["bug".into()],
        };

        assert_eq!(ticket.field("state"), Some(json!("open")));
        assert_eq!(ticket.field("assignee"), Some(json!(7)));
        assert_eq!(ticket.field("labels"), Some(json!(["bug"])));
        assert_eq!(ticket.field("unknown"), None);
    }

    #[test]
    fn subject_macro_writes_fields_by_name() {
        let mut ticket = Ticket::default();

        ticket.set_field("state", json!("closed")).unwrap();
        ticket.set_field("assignee", json!(3)).unwrap();

        assert_eq!(ticket.state, "closed");
        assert_eq!(ticket.assignee, Some(3));
    }

    #[test]
    fn subject_macro_rejects_unknown_or_mistyped_fields() {
        let mut ticket = Ticket::default();

        assert_eq!(
            ticket.set_field("priority", json!(1)),
            Err(FieldError::Unknown {
                field: "priority".into()
            })
        );
        assert!(matches!(
            ticket.set_field("assignee", json!("seven")),
            Err(FieldError::Rejected { .. })
        ));
        assert_eq!(ticket, Ticket::default());
    }

    #[test]
    fn subject_macro_supports_visibility() {
        crate::subject! {
            pub struct PublicDoc {
                pub state: String,
            }
        }

        let doc = PublicDoc {
            state: "draft".into(),
        };
        assert_eq!(doc.field("state"), Some(json!("draft")));
    }
}

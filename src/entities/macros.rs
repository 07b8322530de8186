//! Macros for reducing boilerplate when defining HAL entities
//!
//! These macros generate the [`HalEntity`](crate::core::entity::HalEntity)
//! implementation for serializable structs.

/// Implement `HalEntity` for a `Serialize` struct
///
/// The payload is the struct's serde form. The optional third argument names
/// a `Vec<String>` field holding the assigned-to references.
///
/// # Example
///
/// ```rust
/// use hal::prelude::*;
///
/// #[derive(Serialize)]
/// struct Customer {
///     customer_id: String,
///     assigned_to: Vec<String>,
/// }
///
/// impl_hal_entity!(Customer, "Customer", assigned_to);
///
/// let customer = Customer {
///     customer_id: "c-1".to_string(),
///     assigned_to: vec!["GRP:g-1".to_string()],
/// };
/// assert_eq!(customer.type_name(), "Customer");
/// assert_eq!(customer.to_object()["customer_id"], "c-1");
/// assert_eq!(customer.assigned_to(), vec!["GRP:g-1".to_string()]);
/// ```
#[macro_export]
macro_rules! impl_hal_entity {
    ($type:ident, $type_name:expr) => {
        impl $crate::core::entity::HalEntity for $type {
            fn type_name(&self) -> &str {
                $type_name
            }

            fn to_object(&self) -> ::serde_json::Value {
                ::serde_json::to_value(self).unwrap_or(::serde_json::Value::Null)
            }
        }
    };

    ($type:ident, $type_name:expr, $assigned_field:ident) => {
        impl $crate::core::entity::HalEntity for $type {
            fn type_name(&self) -> &str {
                $type_name
            }

            fn to_object(&self) -> ::serde_json::Value {
                ::serde_json::to_value(self).unwrap_or(::serde_json::Value::Null)
            }

            fn assigned_to(&self) -> Vec<String> {
                self.$assigned_field.clone()
            }
        }
    };
}

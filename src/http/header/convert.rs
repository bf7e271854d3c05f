use super::value::{HeaderValue, TypedHeader};

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

/// Converts stored header values into their wire form.
///
/// Implementations must be deterministic: the same value always
/// produces the same string.
pub trait HeaderStringConverter: Send + Sync {
    fn to_header_string(&self, value: &HeaderValue) -> String;
}

type Delegate = Box<dyn Fn(&dyn Any) -> Option<String> + Send + Sync>;

/// The default [`HeaderStringConverter`].
///
/// Built-in values use their canonical wire form. Caller-defined
/// [`TypedHeader`] values use a registered delegate for their type, or
/// their `Display` form when none is registered.
#[derive(Default)]
pub struct Converters {
    delegates: HashMap<TypeId, Delegate>,
}

impl Converters {
    pub fn new() -> Converters {
        Converters::default()
    }

    /// Registers the conversion used for values of type `T`, replacing
    /// any previous one.
    pub fn register<T, F>(mut self, delegate: F) -> Self
    where
        T: TypedHeader,
        F: Fn(&T) -> String + Send + Sync + 'static,
    {
        self.delegates.insert(
            TypeId::of::<T>(),
            Box::new(move |value: &dyn Any| value.downcast_ref::<T>().map(&delegate)),
        );
        self
    }
}

impl HeaderStringConverter for Converters {
    fn to_header_string(&self, value: &HeaderValue) -> String {
        if let HeaderValue::Typed(typed) = value {
            let typed: &dyn TypedHeader = &**typed;
            let any = typed.as_any();

            if let Some(string) = self.delegates.get(&any.type_id()).and_then(|d| d(any)) {
                return string;
            }
        }

        value.to_string()
    }
}

impl fmt::Debug for Converters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converters")
            .field("delegates", &self.delegates.len())
            .finish()
    }
}

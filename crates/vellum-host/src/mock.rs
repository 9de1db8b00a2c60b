//! Rust-closure-backed host callables.
//!
//! Stands in for the host scripting runtime in tests and pure-Rust
//! embeddings: a [`callable`] wraps an ordinary Rust function as a host
//! value that the widget runtime can invoke, compare, and hash.
//!
//! Callables compare and hash by identity — two wrappings of the same
//! Rust closure are distinct host values, matching how a host runtime
//! treats separately evaluated function objects.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::{DOMAIN_CALLABLE, HostError, HostObject, Value, wymix};

static NEXT_CALLABLE_ID: AtomicU64 = AtomicU64::new(0);

type CallFn = dyn Fn(&[Value]) -> Result<Value, HostError> + Send + Sync;

/// A host function value backed by a Rust closure.
pub struct Callable {
    id: u64,
    run: Arc<CallFn>,
}

impl fmt::Debug for Callable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Callable#{}", self.id)
    }
}

impl HostObject for Callable {
    fn ctor(&self) -> Option<u32> {
        None
    }

    fn field_count(&self) -> usize {
        0
    }

    fn field(&self, index: usize) -> Result<Value, HostError> {
        Err(HostError::MissingField { index })
    }

    fn invoke(&self, args: &[Value]) -> Result<Value, HostError> {
        (self.run)(args)
    }

    fn stable_hash(&self) -> u64 {
        wymix(DOMAIN_CALLABLE, self.id)
    }

    fn eq_value(&self, other: &Value) -> bool {
        other.is_callable() && other.stable_hash() == self.stable_hash()
    }

    fn as_str(&self) -> Option<&str> {
        None
    }

    fn is_callable(&self) -> bool {
        true
    }
}

/// Wrap a Rust closure as a host function value.
pub fn callable(
    run: impl Fn(&[Value]) -> Result<Value, HostError> + Send + Sync + 'static,
) -> Value {
    Arc::new(Callable {
        id: NEXT_CALLABLE_ID.fetch_add(1, Ordering::Relaxed),
        run: Arc::new(run),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{expect_str, invoke, string};

    #[test]
    fn callable_invokes_the_closure() {
        let f = callable(|args| {
            let name = expect_str(&args[0])?;
            Ok(string(format!("hello {name}")))
        });
        let out = invoke(&f, &[string("world")]).unwrap();
        assert_eq!(out.as_str(), Some("hello world"));
    }

    #[test]
    fn callable_equality_is_identity() {
        let f = callable(|_| Ok(string("a")));
        let g = callable(|_| Ok(string("a")));
        assert!(f.eq_value(&f.clone()));
        assert!(!f.eq_value(&g));
    }

    #[test]
    fn callable_is_not_tagged_or_string() {
        let f = callable(|_| Ok(string("")));
        assert_eq!(f.ctor(), None);
        assert_eq!(f.as_str(), None);
        assert!(f.is_callable());
    }

    #[test]
    fn callable_errors_propagate() {
        let f = callable(|_| Err(HostError::eval("boom")));
        assert_eq!(
            invoke(&f, &[]).unwrap_err(),
            HostError::Eval {
                message: "boom".to_string()
            }
        );
    }
}

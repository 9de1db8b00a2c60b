#![forbid(unsafe_code)]
//! Opaque host-value capability surface.
//!
//! The widget runtime evaluates user-supplied view/update/map functions
//! owned by a host scripting runtime. This crate pins down the narrow
//! contract the runtime needs from such a host:
//!
//! - **constructor-index query**: which variant of a declared sum type a
//!   tagged value carries,
//! - **positional field projection**: the payload of a tagged value,
//! - **invocation**: calling a host function value with N arguments,
//! - **stable hashing** and **equality**: identity tests that survive
//!   re-evaluation,
//! - **string payload access** for text and attribute values.
//!
//! Nothing else is assumed. Values are cheap-to-clone `Arc` handles so
//! that task results can cross thread boundaries; everything a host
//! value can do is behind the [`HostObject`] trait.
//!
//! Engine-assembled values (pairs, options, small scalars) are built
//! with the constructors in this crate and satisfy the same trait, so a
//! host function receiving them can project fields without knowing they
//! did not originate in the host.

use std::fmt;
use std::sync::Arc;

pub mod mock;

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure surfaced by a host value operation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HostError {
    #[error("value is not callable")]
    NotCallable,
    #[error("value has no field {index}")]
    MissingField { index: usize },
    #[error("expected a string value")]
    NotAString,
    #[error("expected a constructor-tagged value")]
    Untagged,
    #[error("host evaluation failed: {message}")]
    Eval { message: String },
}

impl HostError {
    /// Evaluation failure with a caller-supplied message.
    pub fn eval(message: impl Into<String>) -> Self {
        Self::Eval {
            message: message.into(),
        }
    }
}

// ---------------------------------------------------------------------------
// Value — the opaque handle
// ---------------------------------------------------------------------------

/// An opaque host value.
///
/// Cloning is cheap; the underlying object is immutable and shared.
pub type Value = Arc<dyn HostObject>;

/// Capability surface of a single host value.
pub trait HostObject: Send + Sync + fmt::Debug {
    /// Constructor index of a tagged value, `None` for strings and
    /// callables.
    fn ctor(&self) -> Option<u32>;

    /// Number of constructor fields (0 for non-tagged values).
    fn field_count(&self) -> usize;

    /// Project the positional field `index`.
    fn field(&self, index: usize) -> Result<Value, HostError>;

    /// Invoke as a function with the given arguments.
    fn invoke(&self, args: &[Value]) -> Result<Value, HostError>;

    /// Stable structural hash; equal values hash equally.
    fn stable_hash(&self) -> u64;

    /// Host equality.
    fn eq_value(&self, other: &Value) -> bool;

    /// String payload, if this is a string value.
    fn as_str(&self) -> Option<&str>;

    /// Whether this value can be invoked.
    fn is_callable(&self) -> bool {
        false
    }
}

// ---------------------------------------------------------------------------
// Shared constructor vocabulary
// ---------------------------------------------------------------------------

/// `option.none`.
pub const OPTION_NONE: u32 = 0;
/// `option.some value`.
pub const OPTION_SOME: u32 = 1;
/// `bool.ff`.
pub const BOOL_FALSE: u32 = 0;
/// `bool.tt`.
pub const BOOL_TRUE: u32 = 1;
/// `list.nil`.
pub const LIST_NIL: u32 = 0;
/// `list.cons head tail`.
pub const LIST_CONS: u32 = 1;
/// Pairs have a single constructor.
pub const PAIR: u32 = 0;

// ---------------------------------------------------------------------------
// Tagged data values
// ---------------------------------------------------------------------------

/// A constructor-tagged value assembled on the engine side.
#[derive(Debug)]
struct Data {
    ctor: u32,
    fields: Vec<Value>,
}

impl HostObject for Data {
    fn ctor(&self) -> Option<u32> {
        Some(self.ctor)
    }

    fn field_count(&self) -> usize {
        self.fields.len()
    }

    fn field(&self, index: usize) -> Result<Value, HostError> {
        self.fields
            .get(index)
            .cloned()
            .ok_or(HostError::MissingField { index })
    }

    fn invoke(&self, _args: &[Value]) -> Result<Value, HostError> {
        Err(HostError::NotCallable)
    }

    fn stable_hash(&self) -> u64 {
        let mut h = wymix(DOMAIN_DATA, u64::from(self.ctor));
        for field in &self.fields {
            h = wymix(h, field.stable_hash());
        }
        h
    }

    fn eq_value(&self, other: &Value) -> bool {
        if other.ctor() != Some(self.ctor) || other.field_count() != self.fields.len() {
            return false;
        }
        self.fields.iter().enumerate().all(|(i, mine)| {
            other
                .field(i)
                .is_ok_and(|theirs| mine.eq_value(&theirs))
        })
    }

    fn as_str(&self) -> Option<&str> {
        None
    }
}

/// A string value.
#[derive(Debug)]
struct Str(String);

impl HostObject for Str {
    fn ctor(&self) -> Option<u32> {
        None
    }

    fn field_count(&self) -> usize {
        0
    }

    fn field(&self, index: usize) -> Result<Value, HostError> {
        Err(HostError::MissingField { index })
    }

    fn invoke(&self, _args: &[Value]) -> Result<Value, HostError> {
        Err(HostError::NotCallable)
    }

    fn stable_hash(&self) -> u64 {
        wymix(DOMAIN_STR, hash_bytes(self.0.as_bytes()))
    }

    fn eq_value(&self, other: &Value) -> bool {
        other.as_str() == Some(self.0.as_str())
    }

    fn as_str(&self) -> Option<&str> {
        Some(&self.0)
    }
}

// ---------------------------------------------------------------------------
// Constructors
// ---------------------------------------------------------------------------

/// Build a constructor-tagged value.
pub fn data(ctor: u32, fields: Vec<Value>) -> Value {
    Arc::new(Data { ctor, fields })
}

/// A field-less constructor. Small scalars are encoded this way: the
/// constructor index is the value.
pub fn simple(ctor: u32) -> Value {
    data(ctor, Vec::new())
}

/// A small unsigned scalar.
pub fn nat(n: u32) -> Value {
    simple(n)
}

/// A string value.
pub fn string(s: impl Into<String>) -> Value {
    Arc::new(Str(s.into()))
}

/// A pair `(a, b)`.
pub fn pair(a: Value, b: Value) -> Value {
    data(PAIR, vec![a, b])
}

/// `option.some value`.
pub fn some(value: Value) -> Value {
    data(OPTION_SOME, vec![value])
}

/// `option.none`.
pub fn none() -> Value {
    simple(OPTION_NONE)
}

/// A boolean.
pub fn boolean(b: bool) -> Value {
    simple(if b { BOOL_TRUE } else { BOOL_FALSE })
}

/// A cons list built from the given items.
pub fn list(items: Vec<Value>) -> Value {
    let mut tail = simple(LIST_NIL);
    for item in items.into_iter().rev() {
        tail = data(LIST_CONS, vec![item, tail]);
    }
    tail
}

// ---------------------------------------------------------------------------
// Decode helpers
// ---------------------------------------------------------------------------

/// Constructor index of `value`, or [`HostError::Untagged`].
pub fn expect_ctor(value: &Value) -> Result<u32, HostError> {
    value.ctor().ok_or(HostError::Untagged)
}

/// String payload of `value`, or [`HostError::NotAString`].
pub fn expect_str(value: &Value) -> Result<String, HostError> {
    value
        .as_str()
        .map(str::to_owned)
        .ok_or(HostError::NotAString)
}

/// Decode a host boolean.
pub fn as_bool(value: &Value) -> Result<bool, HostError> {
    Ok(expect_ctor(value)? != BOOL_FALSE)
}

/// Decode a host option.
pub fn as_option(value: &Value) -> Result<Option<Value>, HostError> {
    if expect_ctor(value)? == OPTION_NONE {
        Ok(None)
    } else {
        Ok(Some(value.field(0)?))
    }
}

/// Decode a host cons list into its items.
pub fn list_items(value: &Value) -> Result<Vec<Value>, HostError> {
    let mut items = Vec::new();
    let mut cursor = value.clone();
    while expect_ctor(&cursor)? != LIST_NIL {
        items.push(cursor.field(0)?);
        let tail = cursor.field(1)?;
        cursor = tail;
    }
    Ok(items)
}

/// Invoke a host function value.
pub fn invoke(f: &Value, args: &[Value]) -> Result<Value, HostError> {
    f.invoke(args)
}

// ---------------------------------------------------------------------------
// Hashing — fast, non-cryptographic, intra-process only
// ---------------------------------------------------------------------------

const DOMAIN_DATA: u64 = 0xa076_1d64_78bd_642f;
const DOMAIN_STR: u64 = 0x8ebc_6af0_9c88_c6e3;
pub(crate) const DOMAIN_CALLABLE: u64 = 0x5899_65cc_7537_4cc3;

/// 128-bit multiply fold.
pub(crate) fn wymix(a: u64, b: u64) -> u64 {
    let full = (a as u128).wrapping_mul((b | 1) as u128);
    (full as u64) ^ ((full >> 64) as u64)
}

/// Hash a byte string 8 bytes at a time.
pub(crate) fn hash_bytes(data: &[u8]) -> u64 {
    let mut h: u64 = data.len() as u64;
    let mut i = 0;
    while i + 8 <= data.len() {
        let mut word = [0u8; 8];
        word.copy_from_slice(&data[i..i + 8]);
        let word = u64::from_le_bytes(word);
        h = wymix(h ^ word, h.wrapping_add(word));
        i += 8;
    }
    if i < data.len() {
        let mut tail = [0u8; 8];
        tail[..data.len() - i].copy_from_slice(&data[i..]);
        let word = u64::from_le_bytes(tail);
        h = wymix(h ^ word, h.wrapping_add(word));
    }
    wymix(h, h ^ 0xe703_7ed1_a0b4_28db)
}

//! # bitdef
//!
//! Bitfield definition library - declaration parsing, bit decoding, and
//! persistence of named definitions.
//!
//! This library provides functionality to:
//! - Parse C-like bitfield struct declarations into ordered field definitions
//! - Infer a definition name from `typedef struct { ... } Name;` text
//! - Interpret free-form hexadecimal or decimal numbers of any size
//! - Decode a number into per-field values, first declared field in the lowest bits
//! - Persist named definitions in a single JSON file
//!
//! ## Example
//!
//! ```no_run
//! use bitdef::{DefinitionStore, StoreConfig};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let text = "typedef struct { unsigned int mode : 3; int level : 5; } Status;";
//!
//! let name = bitdef::infer_definition_name(text);
//! let fields = bitdef::parse(bitdef::strip_outer_braces(text));
//!
//! let value = bitdef::interpret("0xA3");
//! for field in &bitdef::decode(&value, fields.fields()) {
//!     println!("{}: {} bits = {}", field.name, field.width, field.value);
//! }
//!
//! let store = DefinitionStore::new(&StoreConfig::default());
//! store.save(&name, &fields)?;
//! # Ok(())
//! # }
//! ```

pub mod advisory;
pub mod declaration;
pub mod decode;
pub mod definition;
pub mod number;
pub mod session;
pub mod store;

// Re-export commonly used items
#[doc(inline)]
pub use advisory::{AdvisoryLog, ADVISORY_CAPACITY};
#[doc(inline)]
pub use declaration::{infer_definition_name, parse, strip_comments, strip_outer_braces};
#[doc(inline)]
pub use decode::{decode, overflow_bits, Decoded, DecodedField};
#[doc(inline)]
pub use definition::{Definition, FieldDefinition, FieldError};
#[doc(inline)]
pub use number::{interpret, parse_number, Number, NumberError, Radix};
#[doc(inline)]
pub use session::{Session, DEFAULT_DEFINITION_NAME};
#[doc(inline)]
pub use store::{Catalog, DefinitionStore, NamedDefinition, StoreConfig, StoreError};

/// Arbitrary-precision unsigned integer used for decoded values
pub use num_bigint::BigUint;

//! Interactive decoding session.
//!
//! A [`Session`] holds what a front-end is currently looking at: the
//! definition name, the parsed definition, and the number being decoded.
//! Each input change is a method call that updates the state and returns
//! the fresh decode, so callers never wire up change notifications.

use num_bigint::BigUint;
use num_traits::Zero;

use crate::advisory::AdvisoryLog;
use crate::declaration::{infer_definition_name, parse, strip_outer_braces};
use crate::decode::{decode, Decoded};
use crate::definition::Definition;
use crate::number::{parse_number, summary, Number, NumberError};
use crate::store::DefinitionStore;

/// Name used until a declaration or the user provides one
pub const DEFAULT_DEFINITION_NAME: &str = "data_define";

#[derive(Debug)]
pub struct Session {
    store: DefinitionStore,
    name: String,
    /// Contents of the name input; empty means "infer from the declaration"
    name_input: String,
    definition: Option<Definition>,
    value: BigUint,
    log: AdvisoryLog,
}

impl Session {
    pub fn new(store: DefinitionStore) -> Self {
        Self {
            store,
            name: DEFAULT_DEFINITION_NAME.to_string(),
            name_input: String::new(),
            definition: None,
            value: BigUint::zero(),
            log: AdvisoryLog::new(),
        }
    }

    /// Start a session on the first stored definition, if there is one
    pub fn open(store: DefinitionStore) -> Self {
        let mut session = Self::new(store);
        if let Some(first) = session.known_definitions().into_iter().next() {
            session.load(&first);
        }
        session
    }

    pub fn store(&self) -> &DefinitionStore {
        &self.store
    }

    /// Name the current definition would be saved under
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn definition(&self) -> Option<&Definition> {
        self.definition.as_ref()
    }

    pub fn value(&self) -> &BigUint {
        &self.value
    }

    pub fn log(&self) -> &AdvisoryLog {
        &self.log
    }

    /// Set the name input. An empty name goes back to inferring the name
    /// from the next declaration.
    pub fn set_name(&mut self, name: &str) {
        self.name_input = name.to_string();
        if !name.is_empty() {
            self.name = name.to_string();
        }
    }

    /// Replace the declaration text and decode the current value with it
    ///
    /// When no name has been entered, the name is inferred from the text and
    /// also fills the name input, so later edits keep it.
    pub fn set_declaration(&mut self, text: &str) -> Option<Decoded> {
        if self.name_input.is_empty() {
            let inferred = infer_definition_name(text);
            self.name = inferred.clone();
            self.name_input = inferred;
        } else {
            self.name = self.name_input.clone();
        }

        let definition = parse(strip_outer_braces(text));
        self.log.push(format!("definition updated ({} fields)", definition.len()));
        self.definition = Some(definition);
        self.decode()
    }

    /// Read a new number and decode it
    ///
    /// An unreadable number resets the value to 0.
    pub fn set_number(&mut self, raw: &str) -> Option<Decoded> {
        self.apply_number(parse_number(raw))
    }

    /// Use an already parsed number, as returned by [`parse_number`]
    pub fn apply_number(&mut self, parsed: Result<Number, NumberError>) -> Option<Decoded> {
        match parsed {
            Ok(number) => {
                self.log.push(format!("read {} input", number.radix().name()));
                self.value = number.into_value();
            }
            Err(err) => {
                self.log.push(format!("{}, using 0", err));
                self.value = BigUint::zero();
            }
        }
        self.decode()
    }

    /// Decode the current value, or `None` when there are no fields yet
    pub fn decode(&mut self) -> Option<Decoded> {
        let definition = self.definition.as_ref().filter(|d| !d.is_empty())?;
        let decoded = decode(&self.value, definition.fields());
        self.log.push("decoded");
        Some(decoded)
    }

    /// Value summary line, e.g. `DEC: 163 | HEX: 0xA3`
    pub fn value_summary(&self) -> String {
        summary(&self.value)
    }

    /// Persist the current definition under the current name
    ///
    /// Returns false when there is nothing to save, the name is empty, or the
    /// write failed.
    pub fn save(&mut self) -> bool {
        let Some(definition) = self.definition.as_ref().filter(|d| !d.is_empty()) else {
            self.log.push("no fields to save");
            return false;
        };
        if self.name.is_empty() {
            self.log.push("definition name is empty");
            return false;
        }

        match self.store.save(&self.name, definition) {
            Ok(()) => {
                self.log.push(format!("saved definition '{}'", self.name));
                true
            }
            Err(err) => {
                self.log.push(format!("failed to save '{}': {}", self.name, err));
                false
            }
        }
    }

    /// Make a stored definition current and decode with it
    ///
    /// An unknown name leaves the session without a definition.
    pub fn load(&mut self, name: &str) -> Option<Decoded> {
        self.name = name.to_string();
        self.definition = self.store.load_single(name);

        if self.definition.is_some() {
            self.log.push(format!("loaded definition '{}'", name));
        } else {
            self.log.push(format!("no stored definition '{}'", name));
        }
        self.decode()
    }

    /// Names of all stored definitions
    pub fn known_definitions(&self) -> Vec<String> {
        self.store.list_names()
    }

    pub fn delete<I, S>(&mut self, names: I) -> bool
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let deleted = self.store.delete(names);
        if deleted {
            self.log.push("deleted definitions");
        }
        deleted
    }

    pub fn clear_store(&mut self) -> bool {
        let cleared = self.store.clear();
        if cleared {
            self.log.push("cleared stored definitions");
        }
        cleared
    }
}

//! Type assertions on the last instance

use super::Session;
use crate::assertion::AssertArgs;
use crate::error::{Error, Result};
use crate::path::{FieldPath, PathResolver};
use crate::types::{JsonType, JsonValue};
use tracing::debug;

/// Keys that index an instance's schema document directly
/// (`response body`, `request query`, ...)
const INSTANCE_DOCUMENT_DEPTH: usize = 2;

impl Session {
    /// Assert the field is a boolean
    pub fn boolean(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::Boolean, field, &args)
    }

    /// Assert the field is an integer
    pub fn integer(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::Integer, field, &args)
    }

    /// Assert the field is a number
    pub fn number(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::Number, field, &args)
    }

    /// Assert the field is a string
    pub fn string(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::String, field, &args)
    }

    /// Assert the field is an object
    pub fn object(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::Object, field, &args)
    }

    /// Assert the field is an array
    pub fn array(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::Array, field, &args)
    }

    /// Assert the field is `null`
    pub fn null(&mut self, field: &str, args: AssertArgs) -> Result<JsonValue> {
        self.assert_type(JsonType::Null, field, &args)
    }

    /// Assert the field does not exist
    ///
    /// Passes when the path runs into a missing member or index, fails with
    /// `UnexpectedField` when it resolves.
    pub fn missing(&self, field: &str) -> Result<()> {
        let path = FieldPath::parse(field);
        let subject = self.last_instance()?.subject()?;
        match PathResolver::new().resolve(&path, &subject) {
            Ok(found) => Err(Error::UnexpectedField {
                field: path.to_string(),
                value: found.reality,
            }),
            Err(Error::FieldNotFound { key, .. } | Error::IndexNotFound { key, .. }) => {
                debug!("Field '{path}' is missing as expected (no '{key}')");
                Ok(())
            }
            Err(other) => Err(other),
        }
    }

    /// Resolve `field` on the last instance, merge the asserted type and
    /// keywords into its schema node and validate the value against it
    ///
    /// Returns the resolved value. Keyword and coercion errors surface
    /// before the path is resolved.
    fn assert_type(
        &mut self,
        json_type: JsonType,
        field: &str,
        args: &AssertArgs,
    ) -> Result<JsonValue> {
        let prepared = args.prepare(json_type, self.store.version())?;

        let path = FieldPath::parse(field);
        if path.is_empty() {
            return Err(Error::config("Field path is empty"));
        }

        let instance = self.instances.last_mut().ok_or(Error::NoInstances)?;
        let subject = instance.subject()?;
        let resolver = PathResolver::new()
            .with_document_depth(INSTANCE_DOCUMENT_DEPTH)
            .with_examples(instance.exampled());
        let tracked = resolver.resolve_tracked(&path, &subject, &mut instance.schema)?;

        prepared.apply_to(tracked.schema);
        if prepared.skip {
            debug!("Skipping {json_type} validation of '{path}'");
        } else {
            self.validator.assert_schema(tracked.schema, &tracked.reality)?;
        }
        Ok(tracked.reality)
    }
}

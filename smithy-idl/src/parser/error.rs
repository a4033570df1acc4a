use pest::iterators::Pair;
use pest::RuleType;
use std::fmt::{Debug, Display};

// ------------------------------------------------------------------------------------------------
// Public Types
// ------------------------------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub(crate) struct ParserError {
    fn_name: String,
    expecting: Option<String>,
    context: Option<String>,
}

// ------------------------------------------------------------------------------------------------
// Implementations
// ------------------------------------------------------------------------------------------------

impl Display for ParserError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.fn_name)?;
        if let Some(expecting) = &self.expecting {
            write!(f, " expecting {}", expecting)?;
        }
        if let Some(context) = &self.context {
            write!(f, " ({})", context)?;
        }
        Ok(())
    }
}

#[allow(dead_code)]
impl ParserError {
    pub(crate) fn new(fn_name: &str) -> Self {
        Self {
            fn_name: fn_name.to_string(),
            expecting: None,
            context: None,
        }
    }

    pub(crate) fn unexpected<T: RuleType>(fn_name: &str, pair: &Pair<'_, T>) -> Self {
        Self {
            fn_name: fn_name.to_string(),
            expecting: None,
            context: Some(format!("{:?}: {:?}", pair.as_rule(), pair.as_str())),
        }
    }

    pub(crate) fn expecting(mut self, expecting: &str) -> Self {
        self.expecting = Some(expecting.to_string());
        self
    }

    pub(crate) fn context(mut self, context: &dyn Debug) -> Self {
        self.context = Some(format!("{:?}", context));
        self
    }
}

impl From<ParserError> for smithy_core::error::Error {
    fn from(e: ParserError) -> Self {
        smithy_core::error::ErrorKind::Deserialization(
            "Smithy IDL".to_string(),
            "<parse tree>".to_string(),
            Some(e.to_string()),
        )
        .into()
    }
}

mod feature_level;
mod token;
mod value;

pub use feature_level::ExpressionLanguageFeatureLevel;
pub use token::{Token, TokenKind};
pub use value::AttributeValue;

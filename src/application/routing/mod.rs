//! Routing services - the classifier cascade, the responders and the router
//! that ties them together.

mod classifier;
mod errors;
mod responders;
mod router;

pub use classifier::{
    classification_prompt, ClassificationStrategy, CompletionStrategy, IntentClassifier,
    CLASSIFICATION_MAX_TOKENS,
};
pub use errors::{ClassificationError, ResponderError, RouteError};
pub use responders::{
    BillingResponder, OrderResponder, PromptTemplate, Responder, ResponderSettings,
    SupportResponder, GROUNDED_TEMPERATURE, RESPONSE_MAX_TOKENS,
};
pub use router::{IntentRouter, ResponderSet};

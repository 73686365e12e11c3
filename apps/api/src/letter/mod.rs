// Cover-letter drafting. All provider calls go through llm_client.

pub mod generator;
pub mod prompts;

// Final wizard step: cover letter generation + PDF rendering, and document downloads.
// All LLM calls go through llm_client; all PDF work goes through render.

pub mod generator;
pub mod handlers;

// Resume API: upload → extract → LLM parse → store, and retrieval by document id.

pub mod handlers;
pub mod upload;

pub mod prediction;
pub mod record;

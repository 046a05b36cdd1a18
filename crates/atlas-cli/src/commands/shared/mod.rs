pub mod corpus;
pub mod parse;

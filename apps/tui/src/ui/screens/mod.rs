pub mod biodiversity;
pub mod dashboard;
pub mod fisheries;
pub mod help;
pub mod ocean;
pub mod prompt;

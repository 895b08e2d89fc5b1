/// Numeric helpers.
///
/// Small conversion and classification routines shared by the value model and
/// the operator engine. These exist so that integrality checks and index
/// extraction are done the same way everywhere, without silent truncation.
pub mod num;

/// Core value representation.
///
/// Defines the `Value` enum with truthiness, equality and the printed form of
/// every value.
pub mod core;
/// Heap objects: functions, classes, instances and bound methods.
///
/// These are the shared, reference-counted parts of the object model. Method
/// lookup walks the superclass chain and reports the declaring class, which
/// `upar` resolves from.
pub mod object;

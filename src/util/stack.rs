/// If less than this much stack remains, a new segment is allocated.
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment.
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Runs `f`, first growing the stack if little of it is left.
///
/// The parser and the evaluator recurse once per nesting level of the
/// program, so deeply nested expressions or a recursion close to the call
/// ceiling would otherwise overflow a small thread stack (such as the 2 MiB
/// of a test thread in a debug build).
///
/// # Example
/// ```
/// use desiscript::util::stack::ensure_sufficient_stack;
///
/// fn depth(n: u64) -> u64 {
///     ensure_sufficient_stack(|| if n == 0 { 0 } else { depth(n - 1) + 1 })
/// }
///
/// assert_eq!(depth(100_000), 100_000);
/// ```
#[inline]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

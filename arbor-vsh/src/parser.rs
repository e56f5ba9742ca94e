/// Split a command line on whitespace. No quoting or escaping: `echo "a b"`
/// yields the tokens `echo`, `"a` and `b"`.
pub fn tokenize(line: &str) -> Vec<String> {
    line.split_whitespace().map(str::to_string).collect()
}

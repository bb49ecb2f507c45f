// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, or vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! join {
    // Space-separated concatenation, skipping empty parts.
    ($first:expr $(, $rest:expr)+ $(,)?) => {{
        let mut s = ::std::string::String::from($first);
        $(
            let part: &str = $rest;
            if !part.is_empty() {
                if !s.is_empty() { s.push(' '); }
                s.push_str(part);
            }
        )+
        s
    }};
}

// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Trace line rendering.
//!
//! One line per intercepted operation:
//!
//! ```text
//! {indent}# {name}.{op}({arg1:?}, {arg2:?}, …) [{file}:{line}]
//! ```
//!
//! The indent is one space per raw call-stack frame at the point of
//! interception, the name segment follows the policy's [`NamedBy`] strategy,
//! arguments are rendered through their `Debug` representations, and the
//! bracketed call-site suffix comes from the `#[track_caller]` location the
//! proxy captured. The layout is descriptive tooling output, not a wire
//! format.

use std::backtrace::Backtrace;
use std::fmt::{Debug, Write};
use std::panic::Location;

use crate::errors::FormatError;
use crate::policy::{NamedBy, TracePolicy};

/// Renders one trace line for an intercepted operation.
///
/// Any failure (accessor, formatting) surfaces as a [`FormatError`]; the
/// proxy swallows it and skips the line.
pub(crate) fn render<T>(
    policy: &TracePolicy<T>,
    target: &T,
    op: &str,
    args: &[&dyn Debug],
    call_site: &Location<'_>,
) -> Result<String, FormatError> {
    let mut line = String::new();

    if policy.indent {
        for _ in 0..stack_depth() {
            line.push(' ');
        }
    }

    line.push_str("# ");
    line.push_str(&name_segment(policy, target)?);
    write!(line, ".{op}(")?;
    for (i, arg) in args.iter().enumerate() {
        if i > 0 {
            line.push_str(", ");
        }
        write!(line, "{arg:?}")?;
    }
    line.push(')');

    if policy.show_call_site {
        write!(line, " [{}:{}]", call_site.file(), call_site.line())?;
    }

    line.push('\n');
    Ok(line)
}

fn name_segment<T>(policy: &TracePolicy<T>, target: &T) -> Result<String, FormatError> {
    match &policy.named_by {
        NamedBy::TypeName => Ok(short_type_name(std::any::type_name::<T>())),
        NamedBy::Accessor(accessor) => accessor(target),
        NamedBy::Literal(name) => Ok(name.clone()),
    }
}

/// Drops module paths from a `type_name` rendering, inside generic parameters
/// included: `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
fn short_type_name(full: &str) -> String {
    full.split_inclusive(|c: char| !(c.is_alphanumeric() || c == '_' || c == ':'))
        .map(|piece| piece.rsplit("::").next().unwrap_or(piece))
        .collect()
}

/// Raw call-stack depth at the point of interception.
///
/// Counts every captured frame, runtime internals included, matching how the
/// original tooling counted caller frames rather than inferring a logical
/// nesting. Returns 0 where backtrace capture is unsupported, which only
/// flattens indentation.
fn stack_depth() -> usize {
    let captured = Backtrace::force_capture().to_string();
    captured
        .lines()
        .filter(|line| {
            // Frame lines render as "  14: path::to::fn"; location lines
            // ("at src/...") and status lines don't start with an index.
            let trimmed = line.trim_start();
            trimmed
                .split(':')
                .next()
                .is_some_and(|index| !index.is_empty() && index.bytes().all(|b| b.is_ascii_digit()))
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::{NamedBy, TraceOptions, TracePolicy};

    fn bare_policy<T>() -> TracePolicy<T> {
        TracePolicy::resolve(TraceOptions::new().caller(false).indent(false))
    }

    #[test]
    fn renders_type_name_op_and_empty_args() {
        let line = render(&bare_policy(), &1i32, "to_s", &[], Location::caller()).unwrap();
        assert_eq!(line, "# i32.to_s()\n");
    }

    #[test]
    fn renders_arguments_comma_joined_via_debug() {
        let args: &[&dyn Debug] = &[&2, &"x"];
        let line = render(&bare_policy(), &1i32, "to_s", args, Location::caller()).unwrap();
        assert_eq!(line, "# i32.to_s(2, \"x\")\n");
    }

    #[test]
    fn literal_name_is_used_verbatim() {
        let policy = bare_policy().named_by(NamedBy::Literal("bar".into()));
        let line = render(&policy, &1i32, "to_s", &[], Location::caller()).unwrap();
        assert_eq!(line, "# bar.to_s()\n");
    }

    #[test]
    fn accessor_name_is_invoked_against_the_target() {
        let policy = bare_policy().named_by(NamedBy::accessor(|n: &i32| Ok(format!("n={n}"))));
        let line = render(&policy, &7i32, "to_s", &[], Location::caller()).unwrap();
        assert_eq!(line, "# n=7.to_s()\n");
    }

    #[test]
    fn accessor_failure_surfaces_as_a_format_error() {
        let policy =
            bare_policy().named_by(NamedBy::accessor(|_: &i32| Err(FormatError::Name("boom".into()))));
        let err = render(&policy, &1i32, "to_s", &[], Location::caller()).unwrap_err();
        assert!(matches!(err, FormatError::Name(ref msg) if msg == "boom"));
    }

    #[test]
    fn call_site_suffix_carries_file_and_line() {
        let policy: TracePolicy<i32> = TracePolicy::resolve(TraceOptions::new().indent(false));
        let line = render(&policy, &1i32, "to_s", &[], Location::caller()).unwrap();

        assert!(line.starts_with("# i32.to_s() ["));
        assert!(line.contains("format"), "suffix should name this file: {line}");
        assert!(line.ends_with("]\n"));
    }

    #[test]
    fn indentation_prefixes_the_line_with_stack_depth_spaces() {
        let policy: TracePolicy<i32> = TracePolicy::resolve(TraceOptions::new().caller(false));
        let line = render(&policy, &1i32, "to_s", &[], Location::caller()).unwrap();

        assert!(line.starts_with(' '), "expected indentation: {line:?}");
        assert!(line.trim_start().starts_with("# i32.to_s()"));
    }

    #[test]
    fn deeper_calls_indent_further() {
        fn at_depth(extra: usize, policy: &TracePolicy<i32>) -> String {
            if extra == 0 {
                render(policy, &1i32, "to_s", &[], Location::caller()).unwrap()
            } else {
                at_depth(extra - 1, policy)
            }
        }

        let policy: TracePolicy<i32> = TracePolicy::resolve(TraceOptions::new().caller(false));
        let shallow = at_depth(0, &policy);
        let deep = at_depth(5, &policy);

        let width = |line: &str| line.len() - line.trim_start().len();
        assert!(
            width(&deep) > width(&shallow),
            "deep={} shallow={}",
            width(&deep),
            width(&shallow)
        );
    }

    #[test]
    fn short_type_name_strips_paths_inside_generics() {
        assert_eq!(short_type_name("i32"), "i32");
        assert_eq!(short_type_name("alloc::string::String"), "String");
        assert_eq!(
            short_type_name("alloc::vec::Vec<alloc::string::String>"),
            "Vec<String>"
        );
        assert_eq!(
            short_type_name("std::collections::hash::map::HashMap<u32, (bool, u8)>"),
            "HashMap<u32, (bool, u8)>"
        );
    }
}

//! Renders the `locale.h` compatibility header from the Rust definitions.
//!
//! The header is the C-facing half of `lconvshim-abi`: the category values
//! come from [`Category`], the `struct lconv` members from [`LocaleConv`]'s
//! field lists, so the two cannot drift apart.

use std::fmt::Write as _;

use lconvshim_core::locale::{Category, LocaleConv, c_locale_conv};

/// Which `struct lconv` shape to emit. Must match the `opaque-lconv`
/// feature the shared library was built with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LconvShape {
    Populated,
    Opaque,
}

/// Render the complete header text.
#[must_use]
pub fn render_header(shape: LconvShape) -> String {
    let mut out = String::new();
    out.push_str("/* Generated by lconvshim-harness. Do not edit. */\n");
    out.push_str("#ifndef _LOCALE_H_\n#define _LOCALE_H_\n\n");
    out.push_str("#ifdef __cplusplus\nextern \"C\" {\n#endif\n\n");

    out.push_str("enum {\n");
    let width = Category::ALL_CATEGORIES
        .iter()
        .map(|c| c.name().len())
        .max()
        .unwrap_or(0);
    for cat in Category::ALL_CATEGORIES {
        let _ = writeln!(out, "    {:<width$} = {},", cat.name(), cat.as_raw());
    }
    out.push_str("};\n\n");

    out.push_str("char *setlocale(int category, const char *locale);\n\n");

    match shape {
        LconvShape::Populated => render_struct(&mut out, c_locale_conv()),
        LconvShape::Opaque => out.push_str("struct lconv { };\n"),
    }
    out.push_str("struct lconv *localeconv(void);\n\n");

    out.push_str("#ifdef __cplusplus\n}\n#endif\n\n#endif /* _LOCALE_H_ */\n");
    out
}

fn render_struct(out: &mut String, conv: &LocaleConv) {
    out.push_str("struct lconv {\n");
    for (name, _) in conv.string_fields() {
        let _ = writeln!(out, "    char *{name};");
    }
    for (name, _) in conv.numeric_fields() {
        let _ = writeln!(out, "    char {name};");
    }
    out.push_str("};\n\n");
}

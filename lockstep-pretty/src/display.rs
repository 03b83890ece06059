//! Display wrappers for pretty-printing values

use core::fmt::{self, Display, Formatter};

use lockstep_core::Value;

use crate::printer::PrettyPrinter;

/// Display wrapper around a [`Value`].
pub struct PrettyDisplay<'v> {
    pub(crate) value: &'v Value,
    pub(crate) want_type: bool,
    pub(crate) printer: PrettyPrinter,
}

impl PrettyDisplay<'_> {
    /// Show the type name of the root value.
    pub fn typed(mut self) -> Self {
        self.want_type = true;
        self
    }
}

impl Display for PrettyDisplay<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.printer.format_to(self.value, self.want_type, f)
    }
}

/// Extension trait to pretty-print values with `{}`
pub trait ValuePretty {
    /// Short rendering of this value
    fn pretty(&self) -> PrettyDisplay<'_>;

    /// Rendering with custom printer settings
    fn pretty_with(&self, printer: PrettyPrinter) -> PrettyDisplay<'_>;
}

impl ValuePretty for Value {
    fn pretty(&self) -> PrettyDisplay<'_> {
        self.pretty_with(PrettyPrinter::short())
    }

    fn pretty_with(&self, printer: PrettyPrinter) -> PrettyDisplay<'_> {
        PrettyDisplay {
            value: self,
            want_type: false,
            printer,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lockstep_core::reflect;

    #[test]
    fn display_uses_printer() {
        let v = reflect(&(1u8, "a"));
        assert_eq!(v.pretty().to_string(), r#"(1, "a")"#);
        assert_eq!(reflect(&7u8).pretty().typed().to_string(), "u8(7)");
    }

    #[test]
    fn display_with_full_printer() {
        let v = reflect(&vec![true, false]);
        let out = v.pretty_with(PrettyPrinter::full()).to_string();
        assert_eq!(out, "[\n    true,\n    false,\n]");
    }
}

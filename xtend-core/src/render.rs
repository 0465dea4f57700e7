//! Placeholder substitution for generated files.

/// Renders a template by substituting named placeholders.
///
/// Implementations must be pure: the same template and variables always
/// produce the same text.
pub trait TemplateRenderer {
    fn render(&self, template: &str, vars: &[(&str, &str)]) -> String;
}

/// Replaces `{{ key }}` (whitespace inside the braces optional) with its value.
///
/// Placeholders without a matching variable are left untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct MustacheRenderer;

impl TemplateRenderer for MustacheRenderer {
    fn render(&self, template: &str, vars: &[(&str, &str)]) -> String {
        let mut output = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find("{{") {
            output.push_str(&rest[..start]);
            let inner = &rest[start + 2..];
            let Some(end) = inner.find("}}") else {
                output.push_str(&rest[start..]);
                rest = "";
                break;
            };

            let key = inner[..end].trim();
            match vars.iter().find(|(name, _)| *name == key) {
                Some((_, value)) => output.push_str(value),
                None => output.push_str(&rest[start..start + end + 4]),
            }
            rest = &inner[end + 2..];
        }

        output.push_str(rest);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaces_with_and_without_spaces() {
        let out = MustacheRenderer.render("{{ a }}-{{b}}-{{  a}}", &[("a", "1"), ("b", "2")]);
        assert_eq!(out, "1-2-1");
    }

    #[test]
    fn unknown_placeholder_is_kept() {
        let out = MustacheRenderer.render("x {{ missing }} y", &[("a", "1")]);
        assert_eq!(out, "x {{ missing }} y");
    }

    #[test]
    fn unclosed_braces_are_copied_verbatim() {
        let out = MustacheRenderer.render("a {{ b", &[("b", "1")]);
        assert_eq!(out, "a {{ b");
    }

    #[test]
    fn namespace_backslashes_survive() {
        let out = MustacheRenderer.render(
            "namespace {{ extended_namespace }};",
            &[("extended_namespace", "Application\\Acme\\DemoModule")],
        );
        assert_eq!(out, "namespace Application\\Acme\\DemoModule;");
    }
}

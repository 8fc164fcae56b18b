//! Comments and string literals.

use stencil_core::{
    CompileError, HandlerKind, LiteralPattern, MatchingHandler, Node, NodeFilter, OccurrenceKind,
    RegexPredicate,
};
use tracing::trace;

use crate::COMPILER_TARGET;
use crate::context::CompileContext;
use crate::fragments::{Fragment, fragment_regex, split_fragments, string_literal_body};

impl CompileContext<'_, '_> {
    /// A comment consisting of a single variable stands for that variable;
    /// any other comment is matched by its text.
    pub(super) fn attach_comment(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        let text = node.text();
        if let Some(name) = self.marker_variable(text) {
            return self.bind_comment_marker(node, name);
        }
        self.attach_fragments(node, text, OccurrenceKind::Comment)
    }

    pub(super) fn attach_literal(&mut self, node: Node<'_>) -> Result<(), CompileError> {
        let Some(body) = string_literal_body(node.text()) else {
            return Ok(());
        };
        self.attach_fragments(node, body, OccurrenceKind::Literal)
    }

    /// Returns the variable of a `// var`, `/* var */` or `/** var */`
    /// comment.
    fn marker_variable<'t>(&self, text: &'t str) -> Option<&'t str> {
        let body = text
            .strip_prefix("/**")
            .or_else(|| text.strip_prefix("/*"))
            .and_then(|block| block.strip_suffix("*/"))
            .or_else(|| text.strip_prefix("//"))?;
        self.config.typed_var_name(body.trim())
    }

    fn bind_comment_marker(&mut self, node: Node<'_>, name: &str) -> Result<(), CompileError> {
        let id = self.pattern.variable_handler_id(name).ok_or_else(|| {
            CompileError::malformed_pattern(format!(
                "comment `{}` refers to unknown variable '{name}'",
                node.text()
            ))
        })?;
        self.pattern.set_node_handler(node.id(), id);

        if let Some(handler) = self.pattern.handler_mut(id) {
            handler.set_filter(NodeFilter::Comment);
            if let Some(substitution) = handler.as_substitution_mut() {
                substitution
                    .enable_multiline()
                    .map_err(|source| CompileError::invalid_regex(name, source))?;
            }
        }
        self.register_predicate_words(id, OccurrenceKind::Comment);
        Ok(())
    }

    /// Compiles free text with interpolated variables.
    ///
    /// Text made of a single variable is bound to that variable.  Text
    /// without variables gets no handler, but its words are still reported
    /// to the optimizer.
    fn attach_fragments(
        &mut self,
        node: Node<'_>,
        text: &str,
        kind: OccurrenceKind,
    ) -> Result<(), CompileError> {
        let fragments = split_fragments(text, self.config.typed_var_prefix());
        let mut variables = Vec::new();
        let mut last_variable = None;
        let mut has_text = false;

        for fragment in &fragments {
            match *fragment {
                Fragment::Text(piece) => {
                    has_text = true;
                    self.register_words(piece, kind);
                }
                Fragment::Variable(name) => {
                    let id = self.ensure_variable(name)?;
                    self.register_predicate_words(id, kind);
                    variables.push(name.to_owned());
                    last_variable = Some(id);
                }
            }
        }

        let Some(last_handler) = last_variable else {
            return Ok(());
        };
        if !has_text {
            self.pattern.set_node_handler(node.id(), last_handler);
            return Ok(());
        }

        let multiline = kind == OccurrenceKind::Comment;
        let regex = fragment_regex(&fragments, kind == OccurrenceKind::Literal);
        let predicate = RegexPredicate::new(&regex)
            .and_then(|predicate| {
                if multiline {
                    predicate.to_multiline()
                } else {
                    Ok(predicate)
                }
            })
            .map_err(|source| CompileError::invalid_regex(variables.join(", "), source))?;

        trace!(
            target: COMPILER_TARGET,
            node = %node.id(),
            regex = predicate.pattern(),
            "compiled text with interpolated variables"
        );
        self.pattern.attach(
            node.id(),
            MatchingHandler::new(HandlerKind::LiteralWithSubstitutions(LiteralPattern::new(
                predicate, variables,
            ))),
        );
        Ok(())
    }
}

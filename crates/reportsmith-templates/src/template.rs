//! Template parsing and rendering.
//!
//! Templates are LaTeX sources with Jinja-style delimiters chosen to survive
//! inside LaTeX: `\VAR{KEY}` placeholders, `\BLOCK{if FLAG}` /
//! `\BLOCK{else}` / `\BLOCK{endif}` conditionals and `\#{...}` comments.
//! Parsing happens once per template and produces a flat instruction stream;
//! rendering walks the stream and substitutes context values, failing loudly
//! on any key the context does not define.

use std::io;
use std::path::{Path, PathBuf};

use reportsmith_context::RenderContext;
use thiserror::Error;

const VAR_OPEN: &str = "\\VAR{";
const BLOCK_OPEN: &str = "\\BLOCK{";
const COMMENT_OPEN: &str = "\\#{";

/// Errors surfaced while loading, parsing or rendering templates.
#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("failed to read template {path}: {source}")]
    Io { path: PathBuf, source: io::Error },

    #[error("template {path}: {message} (byte offset {offset})")]
    Parse {
        path: PathBuf,
        message: String,
        offset: usize,
    },

    /// A template referenced a placeholder the context does not define. This
    /// is a manifest/schema mismatch and always aborts the render; silently
    /// emitting the raw tag would corrupt the generated document.
    #[error("template {path} references undefined context key '{key}'")]
    MissingContextKey { path: PathBuf, key: String },

    #[error("template {path} uses non-boolean context key '{key}' in a conditional")]
    ConditionalNotFlag { path: PathBuf, key: String },
}

/// One step of a parsed template.
#[derive(Clone, Debug, PartialEq)]
pub enum Instruction {
    Literal(String),
    Placeholder(String),
    Conditional {
        flag: String,
        then_branch: Vec<Instruction>,
        else_branch: Vec<Instruction>,
    },
}

/// A parsed template, ready to render against any context.
#[derive(Clone, Debug)]
pub struct Template {
    path: PathBuf,
    instructions: Vec<Instruction>,
}

impl Template {
    /// Parse template source. `path` is the manifest-relative resource path,
    /// used only for error reporting.
    pub fn parse(path: impl Into<PathBuf>, source: &str) -> Result<Self, TemplateError> {
        let path = path.into();
        let instructions = parse_instructions(&path, source)?;
        Ok(Template { path, instructions })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn instructions(&self) -> &[Instruction] {
        &self.instructions
    }

    /// Render the template against `context`.
    pub fn render(&self, context: &RenderContext) -> Result<String, TemplateError> {
        let mut out = String::new();
        render_into(&self.instructions, context, &self.path, &mut out)?;
        Ok(out)
    }
}

struct Frame {
    flag: String,
    offset: usize,
    then_branch: Vec<Instruction>,
    else_branch: Vec<Instruction>,
    in_else: bool,
}

fn parse_instructions(path: &Path, source: &str) -> Result<Vec<Instruction>, TemplateError> {
    let mut root: Vec<Instruction> = Vec::new();
    let mut stack: Vec<Frame> = Vec::new();
    let mut literal = String::new();
    let mut idx = 0usize;

    while idx < source.len() {
        let tail = &source[idx..];
        let next_tag = [VAR_OPEN, BLOCK_OPEN, COMMENT_OPEN]
            .iter()
            .filter_map(|marker| tail.find(marker).map(|pos| (pos, *marker)))
            .min_by_key(|(pos, _)| *pos);

        let (pos, marker) = match next_tag {
            Some(found) => found,
            None => {
                literal.push_str(tail);
                break;
            }
        };

        let tag_offset = idx + pos;
        let inner_start = tag_offset + marker.len();
        let close = source[inner_start..]
            .find('}')
            .ok_or_else(|| TemplateError::Parse {
                path: path.to_path_buf(),
                message: format!("unterminated '{}' tag", marker.trim_end_matches('{')),
                offset: tag_offset,
            })?;
        let inner = source[inner_start..inner_start + close].trim().to_string();
        let mut after = inner_start + close + 1;

        literal.push_str(&tail[..pos]);

        if marker == VAR_OPEN {
            if !is_identifier(&inner) {
                return Err(TemplateError::Parse {
                    path: path.to_path_buf(),
                    message: format!("invalid placeholder name '{inner}'"),
                    offset: tag_offset,
                });
            }
            flush_literal(&mut literal, current_branch(&mut root, &mut stack));
            current_branch(&mut root, &mut stack).push(Instruction::Placeholder(inner));
            idx = after;
            continue;
        }

        // Block and comment tags swallow surrounding layout: indentation
        // before the tag (when the tag starts a line) and one newline after.
        lstrip_tag_indent(&mut literal);
        if source[after..].starts_with("\r\n") {
            after += 2;
        } else if source[after..].starts_with('\n') {
            after += 1;
        }

        if marker == BLOCK_OPEN {
            flush_literal(&mut literal, current_branch(&mut root, &mut stack));
            apply_directive(path, &inner, tag_offset, &mut root, &mut stack)?;
        }
        // Comments produce nothing.

        idx = after;
    }

    if let Some(frame) = stack.last() {
        return Err(TemplateError::Parse {
            path: path.to_path_buf(),
            message: format!("unclosed conditional on flag '{}'", frame.flag),
            offset: frame.offset,
        });
    }

    flush_literal(&mut literal, &mut root);
    Ok(root)
}

fn apply_directive(
    path: &Path,
    directive: &str,
    offset: usize,
    root: &mut Vec<Instruction>,
    stack: &mut Vec<Frame>,
) -> Result<(), TemplateError> {
    if let Some(flag) = directive.strip_prefix("if ") {
        let flag = flag.trim();
        if !is_identifier(flag) {
            return Err(TemplateError::Parse {
                path: path.to_path_buf(),
                message: format!("invalid conditional flag '{flag}'"),
                offset,
            });
        }
        stack.push(Frame {
            flag: flag.to_string(),
            offset,
            then_branch: Vec::new(),
            else_branch: Vec::new(),
            in_else: false,
        });
        return Ok(());
    }

    match directive {
        "else" => match stack.last_mut() {
            Some(frame) if !frame.in_else => {
                frame.in_else = true;
                Ok(())
            }
            Some(_) => Err(TemplateError::Parse {
                path: path.to_path_buf(),
                message: "duplicate 'else' in conditional".into(),
                offset,
            }),
            None => Err(TemplateError::Parse {
                path: path.to_path_buf(),
                message: "'else' outside of a conditional".into(),
                offset,
            }),
        },
        "endif" => match stack.pop() {
            Some(frame) => {
                current_branch(root, stack).push(Instruction::Conditional {
                    flag: frame.flag,
                    then_branch: frame.then_branch,
                    else_branch: frame.else_branch,
                });
                Ok(())
            }
            None => Err(TemplateError::Parse {
                path: path.to_path_buf(),
                message: "'endif' outside of a conditional".into(),
                offset,
            }),
        },
        other => Err(TemplateError::Parse {
            path: path.to_path_buf(),
            message: format!("unknown block directive '{other}'"),
            offset,
        }),
    }
}

fn current_branch<'a>(
    root: &'a mut Vec<Instruction>,
    stack: &'a mut Vec<Frame>,
) -> &'a mut Vec<Instruction> {
    match stack.last_mut() {
        Some(frame) if frame.in_else => &mut frame.else_branch,
        Some(frame) => &mut frame.then_branch,
        None => root,
    }
}

fn flush_literal(literal: &mut String, branch: &mut Vec<Instruction>) {
    if !literal.is_empty() {
        branch.push(Instruction::Literal(std::mem::take(literal)));
    }
}

/// Strip trailing spaces/tabs from the pending literal when they form the
/// indentation of a line that a block tag starts.
fn lstrip_tag_indent(literal: &mut String) {
    let stripped_len = literal.trim_end_matches([' ', '\t']).len();
    if stripped_len < literal.len() {
        let at_line_start =
            stripped_len == 0 || literal.as_bytes()[stripped_len - 1] == b'\n';
        if at_line_start {
            literal.truncate(stripped_len);
        }
    }
}

fn is_identifier(value: &str) -> bool {
    !value.is_empty()
        && value
            .chars()
            .all(|ch| ch.is_ascii_alphanumeric() || ch == '_')
}

fn render_into(
    instructions: &[Instruction],
    context: &RenderContext,
    path: &Path,
    out: &mut String,
) -> Result<(), TemplateError> {
    for instruction in instructions {
        match instruction {
            Instruction::Literal(text) => out.push_str(text),
            Instruction::Placeholder(key) => match context.get(key) {
                Some(value) => out.push_str(&value.render()),
                None => {
                    return Err(TemplateError::MissingContextKey {
                        path: path.to_path_buf(),
                        key: key.clone(),
                    })
                }
            },
            Instruction::Conditional {
                flag,
                then_branch,
                else_branch,
            } => match context.flag(flag) {
                Some(true) => render_into(then_branch, context, path, out)?,
                Some(false) => render_into(else_branch, context, path, out)?,
                None if context.contains(flag) => {
                    return Err(TemplateError::ConditionalNotFlag {
                        path: path.to_path_buf(),
                        key: flag.clone(),
                    })
                }
                None => {
                    return Err(TemplateError::MissingContextKey {
                        path: path.to_path_buf(),
                        key: flag.clone(),
                    })
                }
            },
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use reportsmith_context::RenderContext;

    fn context() -> RenderContext {
        let mut ctx = RenderContext::new();
        ctx.insert("TITLE", "Sample Title");
        ctx.insert("SHOW", true);
        ctx.insert("HIDE", false);
        ctx
    }

    #[test]
    fn substitutes_placeholders() {
        let template = Template::parse("t.tex", "\\title{\\VAR{TITLE}}\n").unwrap();
        assert_eq!(
            template.render(&context()).unwrap(),
            "\\title{Sample Title}\n"
        );
    }

    #[test]
    fn conditional_branches_follow_flags() {
        let source = "\\BLOCK{if SHOW}\nyes\n\\BLOCK{else}\nno\n\\BLOCK{endif}\n";
        let template = Template::parse("t.tex", source).unwrap();
        assert_eq!(template.render(&context()).unwrap(), "yes\n");

        let source = source.replace("SHOW", "HIDE");
        let template = Template::parse("t.tex", &source).unwrap();
        assert_eq!(template.render(&context()).unwrap(), "no\n");
    }

    #[test]
    fn block_tags_swallow_their_line() {
        let source = "a\n    \\BLOCK{if SHOW}\n    body\n    \\BLOCK{endif}\nb\n";
        let template = Template::parse("t.tex", source).unwrap();
        assert_eq!(template.render(&context()).unwrap(), "a\n    body\nb\n");
    }

    #[test]
    fn comments_disappear_from_output() {
        let template =
            Template::parse("t.tex", "\\#{ internal note }\ncontent\n").unwrap();
        assert_eq!(template.render(&context()).unwrap(), "content\n");
    }

    #[test]
    fn missing_key_is_fatal_and_names_the_template() {
        let template = Template::parse("sections/intro.tex", "\\VAR{UNDECLARED}").unwrap();
        match template.render(&context()) {
            Err(TemplateError::MissingContextKey { path, key }) => {
                assert_eq!(path, Path::new("sections/intro.tex").to_path_buf());
                assert_eq!(key, "UNDECLARED");
            }
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn text_key_in_conditional_is_rejected() {
        let template =
            Template::parse("t.tex", "\\BLOCK{if TITLE}x\\BLOCK{endif}").unwrap();
        assert!(matches!(
            template.render(&context()),
            Err(TemplateError::ConditionalNotFlag { .. })
        ));
    }

    #[test]
    fn unbalanced_conditionals_fail_to_parse() {
        assert!(matches!(
            Template::parse("t.tex", "\\BLOCK{if SHOW}never closed"),
            Err(TemplateError::Parse { .. })
        ));
        assert!(matches!(
            Template::parse("t.tex", "\\BLOCK{endif}"),
            Err(TemplateError::Parse { .. })
        ));
    }

    #[test]
    fn nested_conditionals_render() {
        let source = "\\BLOCK{if SHOW}\\BLOCK{if HIDE}a\\BLOCK{else}b\\BLOCK{endif}\\BLOCK{endif}";
        let template = Template::parse("t.tex", source).unwrap();
        assert_eq!(template.render(&context()).unwrap(), "b");
    }
}

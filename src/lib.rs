//! Import PSTricks drawings into an editable vector-shape tree.
//!
//! The source is LaTeX text with embedded PSTricks drawing commands. It is
//! parsed with a pest grammar, walked depth-first, and every drawing
//! command becomes a typed shape carrying the style in effect at that
//! point. Anything that is not a drawing command is collected as text.
//!
//! ```
//! let shapes = pstricks_import::import(r"\psframe*(0,0)(1,1) \pscircle(2,0){0.5}").unwrap();
//! assert_eq!(shapes.len(), 2);
//! ```

pub mod ast;
pub mod errors;
pub mod import;
pub mod log;
pub mod model;
pub mod parse;
pub mod types;
pub mod walk;

use pest_derive::Parser;

pub use import::{ColorRegistry, ImportOptions, NamedColors};
pub use model::{Shape, ShapeVariant};

#[derive(Parser)]
#[grammar = "pstricks.pest"]
pub struct PstricksParser;

/// Import a document with default options and the predefined colors.
pub fn import(source: &str) -> Result<Vec<ShapeVariant>, miette::Report> {
    let mut registry = NamedColors::new();
    import_with(source, &ImportOptions::default(), &mut registry)
}

/// Import a document, sharing `registry` with the caller.
///
/// Colors defined by the document stay in `registry` afterwards. Only a
/// syntax error fails the import; everything else is logged and skipped.
pub fn import_with(
    source: &str,
    options: &ImportOptions,
    registry: &mut dyn ColorRegistry,
) -> Result<Vec<ShapeVariant>, miette::Report> {
    let document = parse::parse(source)?;
    crate::log::debug!(items = document.items.len(), "parsed document");

    let mut builder = import::TreeBuilder::new(options, registry);
    walk::walk(&mut builder, &document);
    Ok(builder.finish())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pest::Parser;

    #[test]
    fn parse_picture_environment() {
        let input = r"\begin{pspicture}(-1,-1)(3,2) \psline(0,0)(1,1) \end{pspicture}";
        let result = PstricksParser::parse(Rule::document, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_plain_picture_form() {
        let input = r"\pspicture(4,4) \pscircle(2,2){1} \endpspicture";
        let result = PstricksParser::parse(Rule::document, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn parse_nested_pictures() {
        let inputs = [
            r"\rput(1,1){\begin{pspicture}(2,2)\psdot(0,0)\end{pspicture}}",
            r"{\pspicture(2,2)\psdot(0,0)\endpspicture}",
            r"\begin{pspicture}(4,4)\begin{pspicture}(2,2)\psdot(0,0)\end{pspicture}\end{pspicture}",
        ];
        for input in inputs {
            let result = PstricksParser::parse(Rule::document, input);
            assert!(result.is_ok(), "Failed to parse {input}: {:?}", result.err());
        }
    }

    #[test]
    fn parse_psset() {
        let input = r"\psset{linewidth=1.5pt, linecolor=blue, dash=3pt 2pt}";
        let result = PstricksParser::parse(Rule::psset, input);
        assert!(result.is_ok(), "Failed to parse psset: {:?}", result.err());
    }

    #[test]
    fn parse_starred_frame() {
        let result = PstricksParser::parse(Rule::psframe, r"\psframe*[linecolor=red](0,0)(2,1)");
        assert!(result.is_ok(), "Failed to parse psframe: {:?}", result.err());
    }

    #[test]
    fn parse_line_with_arrows() {
        let result = PstricksParser::parse(Rule::psline, r"\psline{<->}(0,0)(1,1)(2,0)");
        assert!(result.is_ok(), "Failed to parse psline: {:?}", result.err());
    }

    #[test]
    fn parse_polar_coord() {
        let result = PstricksParser::parse(Rule::coord, "(2;45)");
        assert!(result.is_ok(), "Failed to parse coord: {:?}", result.err());
    }

    #[test]
    fn parse_empty_coord() {
        let result = PstricksParser::parse(Rule::coord, "()");
        assert!(result.is_ok(), "Failed to parse coord: {:?}", result.err());
    }

    #[test]
    fn parse_dimensioned_value() {
        let result = PstricksParser::parse(Rule::value, "-.5cm");
        assert!(result.is_ok(), "Failed to parse value: {:?}", result.err());
    }

    #[test]
    fn parse_pscustom() {
        let input = r"\pscustom[linewidth=2pt]{\moveto(0,0)\lineto(1,0)\rlineto(0,1)\closepath}";
        let result = PstricksParser::parse(Rule::pscustom, input);
        assert!(result.is_ok(), "Failed to parse pscustom: {:?}", result.err());
    }

    #[test]
    fn parse_rput_with_rotation() {
        let result = PstricksParser::parse(Rule::rput, r"\rput[tl]{*45}(1,1){text}");
        assert!(result.is_ok(), "Failed to parse rput: {:?}", result.err());
    }

    #[test]
    fn parse_definecolor() {
        let result = PstricksParser::parse(Rule::definecolor, r"\definecolor{sky}{rgb}{0.2,0.6,1}");
        assert!(result.is_ok(), "Failed to parse definecolor: {:?}", result.err());
    }

    #[test]
    fn parse_textcolor_with_model() {
        let result = PstricksParser::parse(Rule::textcolor, r"\textcolor[HTML]{FF0000}{warning}");
        assert!(result.is_ok(), "Failed to parse textcolor: {:?}", result.err());
    }

    #[test]
    fn parse_psplot() {
        let result = PstricksParser::parse(Rule::psplot, r"\psplot[plotpoints=200]{0}{6.28}{x sin}");
        assert!(result.is_ok(), "Failed to parse psplot: {:?}", result.err());
    }

    #[test]
    fn parse_comments_and_text() {
        let input = "% a comment\nSome text \\textbf{bold} here";
        let result = PstricksParser::parse(Rule::document, input);
        assert!(result.is_ok(), "Failed to parse: {:?}", result.err());
    }

    #[test]
    fn reject_unterminated_picture() {
        let result = PstricksParser::parse(Rule::document, r"\begin{pspicture}(1,1) \psdot(0,0)");
        assert!(result.is_err());
    }

    #[test]
    fn import_reports_syntax_errors() {
        let err = import(r"\psframe(0,0)(1,1) }").unwrap_err();
        assert!(err.to_string().contains("syntax error"));
    }
}

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use funnelcraft_editor::{tree, walk_element, EditorElement, ElementContent, Visitor};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Args)]
pub struct InspectArgs {
    /// Page tree JSON file
    pub page: PathBuf,
}

pub fn inspect(args: InspectArgs, cwd: &Path) -> Result<()> {
    let path = cwd.join(&args.page);
    let json = fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
    let elements = tree::from_json(&json).with_context(|| format!("loading {}", path.display()))?;

    println!("{} {}", "🔍 Page".bright_blue().bold(), args.page.display());
    println!();
    print!("{}", outline(&elements));
    println!();
    println!(
        "{} {} elements, tree is valid",
        "✓".green(),
        tree::node_count(&elements)
    );

    Ok(())
}

/// Indented one-line-per-element rendering of a page tree
pub fn outline(elements: &[EditorElement]) -> String {
    let mut printer = OutlinePrinter::default();
    for element in elements {
        printer.visit_element(element);
    }
    printer.out
}

#[derive(Default)]
struct OutlinePrinter {
    depth: usize,
    out: String,
}

impl Visitor for OutlinePrinter {
    fn visit_element(&mut self, element: &EditorElement) {
        let detail = match &element.content {
            ElementContent::Text { inner_text } => format!(" \"{}\"", inner_text),
            ElementContent::Link { href, inner_text } => format!(" \"{}\" -> {}", inner_text, href),
            ElementContent::Video { src } => format!(" {}", src),
            _ => String::new(),
        };

        self.out.push_str(&format!(
            "{}{} [{}] #{}{}\n",
            "  ".repeat(self.depth),
            element.name,
            element.element_type(),
            element.id,
            detail
        ));

        self.depth += 1;
        walk_element(self, element);
        self.depth -= 1;
    }
}

//! flexlay command line
//!
//! Lays out a JSON scene and prints the computed boxes.
//!
//! - `flexlay --width 800 scene.json`  # Colored box tree
//! - `flexlay --json scene.json`       # Machine-readable geometry
//! - `RUST_LOG=flexlay=trace flexlay`  # Per-container traces

#![cfg_attr(test, allow(clippy::float_cmp))]

mod scene;

use std::fmt::Write as _;
use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::{ArgAction, Parser};
use flexlay::{
    ExecutionStrategy, FlexResolution, LayoutConfig, NodeId, Rect, Size, compute_layout_with,
};
use flexlay_common::warning::clear_warnings;
use owo_colors::OwoColorize;
use serde::Serialize;

use scene::Scene;

/// flexlay: compute a flexbox layout for a JSON scene
#[derive(Parser, Debug)]
#[allow(clippy::struct_excessive_bools)]
#[command(name = "flexlay")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Lay out a scene in a 1280x720 viewport
    flexlay --width 1280 --height 720 page.json

    # Inline scene, unconstrained height
    flexlay --scene '{"children": [{"flex-grow": 1}, {"flex-grow": 2}]}' --width 300

    # JSON output with the parallel strategy
    flexlay --json --parallel page.json
"#)]
struct Cli {
    /// Path to a JSON scene file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse a JSON scene string instead of a file
    #[arg(long, value_name = "JSON")]
    scene: Option<String>,

    /// Available width for the root (omit for unconstrained)
    #[arg(long)]
    width: Option<f32>,

    /// Available height for the root (omit for unconstrained)
    #[arg(long)]
    height: Option<f32>,

    /// Lay out sibling subtrees on the rayon thread pool
    #[arg(long)]
    parallel: bool,

    /// Resolve flexible lengths with the iterative min/max freeze loop
    #[arg(long)]
    iterative: bool,

    /// Maximum nesting depth before the pass is aborted
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,

    /// Print the layout as JSON
    #[arg(long)]
    json: bool,

    /// Disable colored output
    #[arg(long)]
    no_color: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn config(&self) -> LayoutConfig {
        let mut config = LayoutConfig::default();
        if self.parallel {
            config = config.with_strategy(ExecutionStrategy::Parallel);
        }
        if self.iterative {
            config = config.with_flex_resolution(FlexResolution::Iterative);
        }
        if let Some(depth) = self.max_depth {
            config = config.with_max_depth(depth);
        }
        config
    }

    fn load(&self) -> anyhow::Result<Scene> {
        let json = if let Some(ref json) = self.scene {
            json.clone()
        } else if let Some(ref path) = self.path {
            fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?
        } else {
            anyhow::bail!("a scene file or --scene is required")
        };
        Scene::from_json(&json)
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    let mut scene = cli.load()?;
    clear_warnings();
    compute_layout_with(
        &mut scene.tree,
        scene.root,
        Size::new(cli.width, cli.height),
        &cli.config(),
        &scene.measure,
    )?;

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report(&scene, scene.root))?);
    } else {
        let mut out = String::new();
        write_box(&mut out, &scene, scene.root, 0, !cli.no_color)?;
        print!("{out}");
    }
    Ok(())
}

/// One node's geometry in the JSON output.
#[derive(Debug, Serialize)]
struct BoxReport {
    label: String,
    x: f32,
    y: f32,
    width: f32,
    height: f32,
    /// Border box in root coordinates.
    absolute: Rect,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<BoxReport>,
}

fn report(scene: &Scene, node: NodeId) -> BoxReport {
    let layout = scene.tree.layout(node).unwrap_or_default();
    BoxReport {
        label: scene.label(node),
        x: layout.x,
        y: layout.y,
        width: layout.width,
        height: layout.height,
        absolute: scene.tree.absolute_rect(node).unwrap_or_default(),
        children: scene
            .tree
            .children(node)
            .iter()
            .map(|&child| report(scene, child))
            .collect(),
    }
}

/// Recursively print a box with its dimensions
fn write_box(
    out: &mut String,
    scene: &Scene,
    node: NodeId,
    depth: usize,
    color: bool,
) -> std::fmt::Result {
    let indent = "  ".repeat(depth);
    let layout = scene.tree.layout(node).unwrap_or_default();
    let name = scene.label(node);

    if color {
        writeln!(out, "{indent}[{}] {}", name.bold().cyan(), format!("{node:?}").dimmed())?;
    } else {
        writeln!(out, "{indent}[{name}] {node:?}")?;
    }
    writeln!(
        out,
        "{indent}  box: x={:.1} y={:.1} w={:.1} h={:.1}",
        layout.x, layout.y, layout.width, layout.height
    )?;

    let padding = layout.padding;
    if padding.top != 0.0 || padding.right != 0.0 || padding.bottom != 0.0 || padding.left != 0.0
    {
        writeln!(
            out,
            "{indent}  padding: t={:.1} r={:.1} b={:.1} l={:.1}",
            padding.top, padding.right, padding.bottom, padding.left
        )?;
    }

    for &child in scene.tree.children(node) {
        write_box(out, scene, child, depth + 1, color)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn laid_out(json: &str, width: f32, height: f32) -> Scene {
        let mut scene = Scene::from_json(json).unwrap();
        compute_layout_with(
            &mut scene.tree,
            scene.root,
            Size::definite(width, height),
            &LayoutConfig::default(),
            &scene.measure,
        )
        .unwrap();
        scene
    }

    #[test]
    fn test_cli_flags_build_config() {
        let cli = Cli::parse_from(["flexlay", "--parallel", "--iterative", "--max-depth", "8"]);
        let config = cli.config();
        assert_eq!(config.strategy, ExecutionStrategy::Parallel);
        assert_eq!(config.flex_resolution, FlexResolution::Iterative);
        assert_eq!(config.max_depth, 8);
    }

    #[test]
    fn test_missing_scene_is_an_error() {
        let cli = Cli::parse_from(["flexlay"]);
        assert!(cli.load().is_err());
    }

    #[test]
    fn test_plain_tree_dump() {
        let scene = laid_out(
            r#"{ "label": "row", "children": [
                { "label": "a", "flex-grow": 1 },
                { "label": "b", "flex-grow": 1 }
            ] }"#,
            200.0,
            50.0,
        );
        let mut out = String::new();
        write_box(&mut out, &scene, scene.root, 0, false).unwrap();

        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines[0], "[row] NodeId(2)");
        assert_eq!(lines[1], "  box: x=0.0 y=0.0 w=200.0 h=50.0");
        assert_eq!(lines[2], "  [a] NodeId(0)");
        assert_eq!(lines[5], "    box: x=100.0 y=0.0 w=100.0 h=50.0");
    }

    #[test]
    fn test_json_report_nests_children() {
        let scene = laid_out(
            r#"{ "padding": { "left": { "fixed": 10 }, "top": { "fixed": 5 } },
                 "children": [ { "label": "only", "width": { "fixed": 30 } } ] }"#,
            100.0,
            50.0,
        );
        let value = serde_json::to_value(report(&scene, scene.root)).unwrap();
        let child = &value["children"][0];
        assert_eq!(child["label"], "only");
        assert_eq!(child["absolute"]["x"], 10.0);
        assert_eq!(child["absolute"]["y"], 5.0);
        assert!(child.get("children").is_none());
    }
}

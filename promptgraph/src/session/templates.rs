//! Quick-start templates: small pre-wired graphs loaded into a fresh
//! workspace.

use crate::graph::Point;

/// Built-in starter layouts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Template {
    /// One explainer node with two children branching off it.
    Bread,
    /// One core summary node fanning out into three follow-ups.
    Science,
    /// Three unconnected root nodes.
    Blank,
}

pub(super) struct TemplateNode {
    pub prompt: &'static str,
    pub at: Point,
}

pub(super) struct TemplateSpec {
    pub nodes: &'static [TemplateNode],
    /// Edges as (source, target) indices into `nodes`.
    pub edges: &'static [(usize, usize)],
}

const BREAD: TemplateSpec = TemplateSpec {
    nodes: &[
        TemplateNode {
            prompt: "Explain how bread is made.",
            at: Point { x: 40.0, y: 80.0 },
        },
        TemplateNode {
            prompt: "What happens during baking chemically?",
            at: Point { x: 440.0, y: 40.0 },
        },
        TemplateNode {
            prompt: "I want a really soft bread. Give me a recipe.",
            at: Point { x: 440.0, y: 220.0 },
        },
    ],
    edges: &[(0, 1), (0, 2)],
};

const SCIENCE: TemplateSpec = TemplateSpec {
    nodes: &[
        TemplateNode {
            prompt: "Summarize quantum entanglement.",
            at: Point { x: 40.0, y: 60.0 },
        },
        TemplateNode {
            prompt: "Explain it like I am five.",
            at: Point { x: 460.0, y: 0.0 },
        },
        TemplateNode {
            prompt: "Compare entanglement to classical correlation.",
            at: Point { x: 460.0, y: 140.0 },
        },
        TemplateNode {
            prompt: "List real-world systems where entanglement is useful.",
            at: Point { x: 460.0, y: 280.0 },
        },
    ],
    edges: &[(0, 1), (0, 2), (0, 3)],
};

const BLANK: TemplateSpec = TemplateSpec {
    nodes: &[
        TemplateNode {
            prompt: "New root idea",
            at: Point { x: 80.0, y: 60.0 },
        },
        TemplateNode {
            prompt: "Another branch",
            at: Point { x: 420.0, y: 60.0 },
        },
        TemplateNode {
            prompt: "Third branch",
            at: Point { x: 420.0, y: 220.0 },
        },
    ],
    edges: &[],
};

impl Template {
    pub(super) fn spec(self) -> &'static TemplateSpec {
        match self {
            Template::Bread => &BREAD,
            Template::Science => &SCIENCE,
            Template::Blank => &BLANK,
        }
    }
}

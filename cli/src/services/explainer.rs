//! Learning explainer: canned Q&A gated by the daily cap

use lde_entitlement::EntitlementEngine;
use serde::Serialize;
use std::str::FromStr;

pub const CAP_REACHED_MESSAGE: &str =
    "Daily cap reached for your current plan. Upgrade or contribute battery to increase the cap.";

pub const NOT_FOUND_MESSAGE: &str = "Answer not in local knowledge yet. Try another topic.";

/// Credits awarded per answered question
const ANSWER_CREDITS: i64 = 1;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    Simple,
    Detailed,
    Compare,
}

impl FromStr for Style {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(Self::Simple),
            "detailed" => Ok(Self::Detailed),
            "compare" => Ok(Self::Compare),
            other => Err(format!("unknown style: {}", other)),
        }
    }
}

struct Entry {
    question: &'static str,
    simple: &'static str,
    detailed: &'static str,
    compare: &'static str,
}

impl Entry {
    fn answer(&self, style: Style) -> &'static str {
        match style {
            Style::Simple => self.simple,
            Style::Detailed => self.detailed,
            Style::Compare => self.compare,
        }
    }
}

const KNOWLEDGE: &[Entry] = &[
    Entry {
        question: "what is python",
        simple: "Python is a general-purpose programming language.",
        detailed: "Python is a high-level, interpreted language great for data, AI, web, and automation.",
        compare: "Python vs C++: Python is easier and slower; C++ is faster and lower-level.",
    },
    Entry {
        question: "what is a function",
        simple: "A function is a reusable block of code.",
        detailed: "A function groups statements under a name, accepts inputs (params), and can return a value.",
        compare: "Function vs Method: a method is a function bound to an object (has self).",
    },
    Entry {
        question: "what is a module",
        simple: "A module is a Python file with code.",
        detailed: "Modules organize code into files; import them to reuse functions, classes, and variables.",
        compare: "Module vs Package: package is a folder of modules with __init__.py.",
    },
    Entry {
        question: "how to read a file",
        simple: "Use open('file.txt').read().",
        detailed: "Use with open('file.txt') as f: data = f.read(); it safely closes the file.",
        compare: "read vs readline: read gets all, readline gets one line.",
    },
    Entry {
        question: "what is oop",
        simple: "OOP organizes code with classes and objects.",
        detailed: "OOP uses classes (blueprints) and objects (instances) with encapsulation and inheritance.",
        compare: "OOP vs FP: OOP focuses on objects; FP focuses on pure functions and immutability.",
    },
    Entry {
        question: "what is multiprocessing",
        simple: "It runs code on multiple CPU cores.",
        detailed: "Multiprocessing creates separate processes to run tasks in parallel, avoiding GIL limits.",
        compare: "Multiprocessing vs Threading: processes bypass GIL; threads share memory but hit GIL.",
    },
    Entry {
        question: "dps vs fps",
        simple: "DPS is parallel compute; FPS is chunked file processing.",
        detailed: "DPS parallelizes CPU work across cores; FPS splits file input into manageable chunks.",
        compare: "DPS gains with CPU; FPS gains with streaming/chunking I/O.",
    },
    Entry {
        question: "how to win hackathon",
        simple: "Solve a real problem and demo clearly.",
        detailed: "Align with judging; show polished demo, monetization, and reliability under constraints.",
        compare: "MVP vs MLP: MVP functions; MLP delights with polish.",
    },
    Entry {
        question: "what is mvp vs prototype",
        simple: "MVP is minimal and usable; prototype is a quick demo.",
        detailed: "MVP is functional and testable; prototype explores ideas and may be incomplete.",
        compare: "MVP aims for users; prototype aims for validation.",
    },
    Entry {
        question: "what is api",
        simple: "An API lets apps talk to each other.",
        detailed: "APIs define endpoints and data formats to request and exchange information.",
        compare: "REST vs GraphQL: REST has fixed endpoints; GraphQL lets clients ask for specific data.",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReplyKind {
    Answered,
    NotFound,
    CapReached,
}

#[derive(Debug, Clone, Serialize)]
pub struct Reply {
    pub kind: ReplyKind,
    pub text: String,
}

/// Topics the explainer knows
pub fn topics() -> impl Iterator<Item = &'static str> {
    KNOWLEDGE.iter().map(|e| e.question)
}

/// Answer `question` in `style`. Unknown styles fall back to simple.
///
/// Consumes one unit of the daily cap before looking anything up.
pub fn answer(engine: &EntitlementEngine, style: &str, question: &str) -> Reply {
    let style = style.parse().unwrap_or(Style::Simple);
    let question = question.trim().to_lowercase();

    if !engine.try_consume_message() {
        return Reply {
            kind: ReplyKind::CapReached,
            text: CAP_REACHED_MESSAGE.into(),
        };
    }

    engine.add_credits(ANSWER_CREDITS);
    match KNOWLEDGE.iter().find(|e| e.question == question) {
        Some(entry) => Reply {
            kind: ReplyKind::Answered,
            text: entry.answer(style).into(),
        },
        None => Reply {
            kind: ReplyKind::NotFound,
            text: NOT_FOUND_MESSAGE.into(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_engine as engine;

    #[test]
    fn test_answers_in_style() {
        let engine = engine();
        let reply = answer(&engine, "detailed", "  What is OOP ");
        assert_eq!(reply.kind, ReplyKind::Answered);
        assert!(reply.text.starts_with("OOP uses classes"));
        assert_eq!(engine.credits(), 1);
    }

    #[test]
    fn test_unknown_style_falls_back() {
        let engine = engine();
        let reply = answer(&engine, "poetic", "what is api");
        assert_eq!(reply.text, "An API lets apps talk to each other.");
    }

    #[test]
    fn test_unknown_question_still_consumes() {
        let engine = engine();
        let reply = answer(&engine, "simple", "what is rust");
        assert_eq!(reply.kind, ReplyKind::NotFound);
        assert_eq!(engine.summary().messages_used_today, 1);
        assert_eq!(engine.credits(), 1);
    }

    #[test]
    fn test_cap_reached() {
        let engine = engine();
        for _ in 0..25 {
            answer(&engine, "simple", "what is python");
        }
        let reply = answer(&engine, "simple", "what is python");
        assert_eq!(reply.kind, ReplyKind::CapReached);
        assert_eq!(reply.text, CAP_REACHED_MESSAGE);
        assert_eq!(engine.credits(), 25);
    }

    #[test]
    fn test_topics() {
        assert_eq!(topics().count(), 10);
    }
}

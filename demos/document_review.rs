//! Document Review with Performers
//!
//! This example binds a document type to a process-wide engine and runs
//! performer hooks around each state change.
//!
//! Key concepts:
//! - Governed types asking transition questions of themselves
//! - Actor kinds (reviewers) next to actor fields (the author)
//! - Performer hooks and a persistence callback around the state write
//! - Side data passed through to hooks
//!
//! Run with: cargo run --example document_review

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::LazyLock;
use warden::builder::rule;
use warden::core::Principal;
use warden::engine::{Engine, HookError, PerformerHooks};
use warden::{subject, Governed};

subject! {
    #[derive(Debug)]
    struct Document {
        title: String,
        state: String,
        author: u64,
        summary: Option<String>,
        approved_by: Option<String>,
    }
}

static SAVES: AtomicUsize = AtomicUsize::new(0);

static DOCUMENT_RULES: LazyLock<Engine<Document, String>> = LazyLock::new(|| {
    Engine::builder()
        .performer(
            "approving",
            PerformerHooks::<Document, String>::new()
                .before(|doc, context| {
                    if context.extra.is_empty() {
                        return Err(HookError::new("approval needs a reviewer note"));
                    }
                    doc.approved_by = Some(context.extra.clone());
                    Ok(())
                })
                .after(|doc, context| {
                    println!("  [Notify] '{}' is now {}", doc.title, context.to);
                    Ok(())
                }),
        )
        .persist(|doc, _| {
            SAVES.fetch_add(1, Ordering::SeqCst);
            println!("  [Store] saved '{}' in state {}", doc.title, doc.state);
            Ok(())
        })
        .rule(
            rule("draft", "review")
                .actor_field("author")
                .require("summary"),
        )
        .and_then(|b| b.rule(rule("review", "approved").actor_kind("Reviewer").performer("approving")))
        .and_then(|b| b.rule(rule("review", "draft").actor_kind("Reviewer")))
        .and_then(|b| b.build())
        .expect("document rules are valid")
});

impl Governed for Document {
    type Extra = String;

    fn engine() -> &'static Engine<Self, String> {
        &DOCUMENT_RULES
    }
}

fn main() {
    println!("=== Document Review ===\n");

    let author = Principal::new(1);
    let reviewer = Principal::new(2).with_kind("Reviewer");

    let mut doc = Document {
        title: "Quarterly Report".to_string(),
        state: "draft".to_string(),
        author: 1,
        summary: None,
        approved_by: None,
    };

    println!("Step 1: Submit for review");
    println!("  Required before review: {:?}", doc.required_fields("review").unwrap());
    doc.summary = Some("Revenue up, costs flat".to_string());
    doc.perform_transition(&author, "review", &String::new())
        .unwrap();
    println!("  State: {}\n", doc.state);

    println!("Step 2: Reviewer options");
    for view in doc.show_transitions(&reviewer).unwrap() {
        println!("  -> {} (can perform: {})", view.to, view.can_perform);
    }
    println!("  Author options: {:?}\n", doc.successors(&author).unwrap());

    println!("Step 3: Approve without a note");
    if let Err(e) = doc.perform_transition(&reviewer, "approved", &String::new()) {
        println!("  Error: {}", e);
    }
    println!("  State still: {}\n", doc.state);

    println!("Step 4: Approve with a note");
    let record = doc
        .perform_transition(&reviewer, "approved", &"Looks good".to_string())
        .unwrap();
    println!("  Performer: {:?}", record.performer);
    println!("  Approved by: {:?}", doc.approved_by);
    println!("  State: {}\n", doc.state);

    println!("Documents saved: {}", SAVES.load(Ordering::SeqCst));

    println!("\nKey Takeaways:");
    println!("- Governed types carry their own engine");
    println!("- A failing before hook leaves the state untouched");
    println!("- Persistence runs right after the state is written");

    println!("\n=== Example Complete ===");
}

use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use zcomp::prelude::*;

const QUESTIONS: [(&str, &str); 3] = [
    ("What is a spoiler?", "A block whose body is hidden until its head is clicked."),
    ("Can several be open?", "Not inside an exclusive group."),
    ("Can they nest?", "Spoilers can. Groups cannot."),
];

fn main() -> zcomp::Result<()> {
    // Set up file logging
    let log_file = File::create("accordion.log").expect("Failed to create log file");
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let doc = Document::new();
    doc.append(doc.body(), faq())?;

    let spoilers = spoiler_factory(&doc);
    spoilers.init()?;
    let groups = spoiler_group_factory(&doc, &spoilers);
    groups.init()?;

    doc.add_event_listener(doc.body(), "after-spoiler-change-state", |e| {
        if let Some(detail) = e.detail::<ChangeStateDetail>() {
            println!("  event: {:?} opened={}", e.target(), detail.new_state_is_opened);
        }
    });

    print_state("initial", &doc);
    for index in [1, 2, 2] {
        let head = doc
            .element_by_id(&format!("q{index}-head"))
            .expect("question head");
        println!("click q{index}");
        doc.click(head);
        print_state(&format!("after q{index}"), &doc);
    }

    Ok(())
}

fn faq() -> zdom::ElementBuilder {
    el("section")
        .class("faq js-spoiler-group")
        .flag("data-spoiler-group-exclusive")
        .attr("data-spoiler-group-opened-index", "0")
        .children(QUESTIONS.into_iter().enumerate().map(|(i, (question, answer))| {
            el("article")
                .class("js-spoiler")
                .id(format!("q{i}"))
                .child(
                    el("button")
                        .class("js-spoiler__head")
                        .id(format!("q{i}-head"))
                        .text(question),
                )
                .child(
                    el("span")
                        .attr("data-spoiler-opened-text", "hide")
                        .attr("data-spoiler-closed-text", "show"),
                )
                .child(el("p").class("js-spoiler__body").text(answer))
        }))
}

fn print_state(label: &str, doc: &Document) {
    println!("{label}:");
    for i in 0..QUESTIONS.len() {
        if let Some(node) = doc.element_by_id(&format!("q{i}")) {
            println!("  q{i}: {}", doc.classes(node).join(" "));
        }
    }
}

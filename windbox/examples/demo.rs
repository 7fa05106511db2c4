use std::fs::File;

use simplelog::{Config, LevelFilter, WriteLogger};
use windbox::{WindBox, WindBoxConfig};
use windom::{Document, Element, Key};

fn faq(title: &str, entries: &[(&str, &str)]) -> Element {
    Element::section()
        .class("faq")
        .attr("aria-label", title)
        .children(entries.iter().map(|(question, answer)| {
            Element::div()
                .child(Element::button().text(*question))
                .child(Element::div().child(Element::p().text(*answer)))
        }))
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Set up file logging
    let log_file = File::create("windbox.log")?;
    WriteLogger::init(LevelFilter::Debug, Config::default(), log_file)
        .expect("Failed to initialize logger");

    let mut doc = Document::new(Element::new("body").children([
        faq(
            "Shipping",
            &[
                ("Where do you ship?", "Everywhere the post goes."),
                ("How long does it take?", "Three to five days."),
                ("Can I track my order?", "Yes, from your account page."),
            ],
        ),
        faq(
            "Returns",
            &[
                ("Can I return an item?", "Within thirty days."),
                ("Who pays for return shipping?", "We do."),
            ],
        ),
    ]));

    let windbox = WindBox::create(&mut doc, WindBoxConfig::new(".faq"))?;
    windbox.on_change(|change| {
        println!(
            "group {} item {} ({}) is now {:?}",
            change.group, change.item, change.item_id, change.state
        );
    });

    let shipping = &windbox.groups()[0];
    let returns = &windbox.groups()[1];

    doc.click(shipping.items()[1].header);
    doc.click(shipping.items()[2].header);
    doc.key(returns.items()[0].header, Key::Enter);
    doc.click(shipping.items()[2].header);

    println!();
    println!("{doc}");

    Ok(())
}

extern crate h5tree;

use std::collections::HashMap;
use std::fs;
use std::env;
use std::io::Read;
use std::process;

fn main() {
    let args: Vec<_> = env::args().collect();

    if args.len() != 2 {
        println!("Usage:\n\tcargo run --example stats -- input.html");
        process::exit(1);
    }

    let text = load_file(&args[1]);
    let doc = match h5tree::Document::parse(&text) {
        Ok(v) => v,
        Err(e) => {
            println!("Error: {}.", e);
            process::exit(1);
        }
    };

    if let Some(doctype) = doc.doctype() {
        println!("Doctype: {}", doctype.name());
    }

    println!("Elements count: {}",
             doc.root().descendants().filter(|n| n.is_element()).count());

    let attrs_count: usize = doc.root().descendants().map(|n| n.attributes().len()).sum();
    println!("Attributes count: {}", attrs_count);

    let max_depth = doc.root().descendants()
        .filter(|n| n.is_element())
        .map(|n| n.ancestors().count())
        .max()
        .unwrap_or(0);
    println!("Max depth: {}", max_depth);

    let mut tags = HashMap::new();
    for node in doc.root().descendants().filter(|n| n.is_element()) {
        *tags.entry(node.tag_name()).or_insert(0) += 1;
    }

    let mut tags: Vec<_> = tags.into_iter().collect();
    tags.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(b.0)));
    println!("Unique tags count: {}", tags.len());
    for (name, count) in tags {
        println!("  {}: {}", name, count);
    }

    println!("Comments count: {}",
             doc.root().descendants().filter(|n| n.is_comment()).count());

    println!("Comments:");
    for node in doc.root().descendants().filter(|n| n.is_comment()) {
        println!("{:?}", node.text().unwrap());
    }
}

fn load_file(path: &str) -> String {
    let mut file = fs::File::open(&path).unwrap();
    let mut text = String::new();
    file.read_to_string(&mut text).unwrap();
    text
}

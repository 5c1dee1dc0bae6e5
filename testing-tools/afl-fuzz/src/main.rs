extern crate afl;
extern crate h5tree;

use afl::fuzz;

fn main() {
    fuzz(|data| {
        // Arbitrary bytes, so invalid UTF-8 is covered as well.
        let mut parser = match h5tree::Parser::new(h5tree::Document::new(), Default::default()) {
            Ok(v) => v,
            Err(_) => return,
        };

        if parser.feed(data).is_err() {
            return;
        }

        if let Ok(doc) = parser.finish() {
            let html = doc.to_html();
            let doc2 = h5tree::Document::parse(&html).unwrap();
            assert_eq!(doc, doc2);
        }
    });
}

extern crate h5tree;

use h5tree::*;

// Document.getElementsByTagName()
#[test]
fn get_elements_by_tag_name() {
    let data = "\
<!-- comment -->
<div>
    <img src=a>
    <p>Text</p>
    <section>
        <!-- comment -->
        <img src=b>
    </section>
</div>
";

    let doc = Document::parse(data).unwrap();

    let nodes: Vec<Node> = doc
        .descendants()
        .filter(|n| n.has_tag_name("img"))
        .collect();
    assert_eq!(nodes.len(), 2);
}

// ParentNode.childElementCount
#[test]
fn child_element_count() {
    let data = "\
<ul>
    <li></li>
    <!-- comment -->
    <li></li>
    <!-- comment -->
    <li></li>
</ul>
";

    let doc = Document::parse(data).unwrap();
    let ul = doc.root_element().unwrap();

    let count = ul.children().filter(|n| n.is_element()).count();
    assert_eq!(count, 3);
}

// ParentNode.firstElementChild
#[test]
fn first_element_child() {
    let data = "\
<ul>
    <!-- comment -->
    <li id='1'></li>
    <li id='2'></li>
</ul>
";

    let doc = Document::parse(data).unwrap();
    let ul = doc.root_element().unwrap();

    let li = ul.first_element_child().unwrap();
    assert_eq!(li.attribute("id"), Some("1"));
}

// ParentNode.lastElementChild
#[test]
fn last_element_child() {
    let data = "\
<ul>
    <li id='1'></li>
    <li id='2'></li>
    <!-- comment -->
</ul>
";

    let doc = Document::parse(data).unwrap();
    let ul = doc.root_element().unwrap();

    let li = ul.last_element_child().unwrap();
    assert_eq!(li.attribute("id"), Some("2"));
}

// Document.getElementById
#[test]
fn get_element_by_id() {
    let data = "\
<div>
    <p id='p1'>1</p>
    <p id='p2'>2</p>
</div>
";

    let doc = Document::parse(data).unwrap();

    let p = doc.descendants().find(|n| n.attribute("id") == Some("p2")).unwrap();
    assert_eq!(p.text(), Some("2"));
}

// Node.ownerDocument
#[test]
fn owner_document() {
    let doc = Document::parse("<div></div>").unwrap();
    let div = doc.root_element().unwrap();
    assert_eq!(div.document() as *const Document, &doc as *const Document);
}

// Node.parentElement
#[test]
fn parent_element() {
    let data = "\
<div>
    <section>
        <!-- comment -->
        <p></p>
    </section>
</div>
";

    let doc = Document::parse(data).unwrap();

    let p = doc.descendants().find(|n| n.has_tag_name("p")).unwrap();
    assert!(p.parent_element().unwrap().has_tag_name("section"));

    let comment = doc.descendants().find(|n| n.is_comment()).unwrap();
    assert!(comment.parent_element().unwrap().has_tag_name("section"));

    let div = doc.root_element().unwrap();
    assert_eq!(div.parent_element(), None);
    assert!(div.parent().unwrap().is_document());
}

// Node.contains
#[test]
fn contains() {
    let data = "\
<div>
    <section>
        <p></p>
    </section>
    <img>
</div>
";

    let doc = Document::parse(data).unwrap();
    let section = doc.descendants().find(|n| n.has_tag_name("section")).unwrap();
    let p = doc.descendants().find(|n| n.has_tag_name("p")).unwrap();
    let img = doc.descendants().find(|n| n.has_tag_name("img")).unwrap();

    assert!(section.descendants().any(|n| n == p));
    assert!(!section.descendants().any(|n| n == img));
}

// Node.hasChildNodes
#[test]
fn has_child_nodes() {
    let doc = Document::parse("<div><br><p>text</p></div>").unwrap();

    let br = doc.descendants().find(|n| n.has_tag_name("br")).unwrap();
    let p = doc.descendants().find(|n| n.has_tag_name("p")).unwrap();

    assert!(!br.has_children());
    assert!(p.has_children());
}

// Node.textContent
#[test]
fn text_content() {
    let doc = Document::parse("<p>a<b>b<i>c</i></b>d<!-- e --></p>").unwrap();
    let p = doc.root_element().unwrap();

    let text: String = p.descendants()
        .filter(|n| n.is_text() && !n.parent().unwrap().is_comment())
        .map(|n| n.text().unwrap())
        .collect();
    assert_eq!(text, "abcd");
}

// Element.outerHTML
#[test]
fn outer_html() {
    let doc = Document::parse("<div><p class=x>a &amp; b</p><hr></div>").unwrap();

    let p = doc.descendants().find(|n| n.has_tag_name("p")).unwrap();
    assert_eq!(p.to_html(), "<p class=\"x\">a &amp; b</p>");

    let hr = doc.descendants().find(|n| n.has_tag_name("hr")).unwrap();
    assert_eq!(hr.to_html(), "<hr>");
}

// Document.doctype
#[test]
fn doctype() {
    let doc = Document::parse("<!DOCTYPE html>\n<html></html>").unwrap();

    assert_eq!(doc.doctype().unwrap().name(), "html");
    assert!(doc.root().first_child().unwrap().is_doctype());
}

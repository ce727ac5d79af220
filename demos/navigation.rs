use slipstream_view::dom::in_memory::{InMemoryDocument, InMemorySnapshot};
use slipstream_view::dom::Element;
use slipstream_view::events::BroadcastDelegate;
use slipstream_view::render::replace::ReplaceRenderer;
use slipstream_view::{location, View, ViewError, ViewId};
use std::sync::Arc;
use url::Url;

#[tokio::main]
async fn main() -> Result<(), ViewError> {
    env_logger::init();

    // Set up the live document. In a real host this is the browser DOM; here
    // we use the in-memory document that ships with the crate.
    let doc = InMemoryDocument::new();
    let intro = doc.create_element("p");
    doc.append(intro);

    // Pin the view id so the delegate and the view agree on it. The
    // broadcast delegate republishes every lifecycle callback as an event.
    let view_id = ViewId::new();
    let delegate = Arc::new(BroadcastDelegate::new(view_id));
    let mut event_rx = delegate.subscribe();

    let view = View::builder()
        .id(view_id)
        .root(doc.root())
        .delegate(delegate)
        .source(doc.clone())
        .build()?;

    // Build the snapshot the navigation is heading toward: an article with
    // an anchored section heading.
    let title = doc.create_element("h1");
    title.set_attribute("id", "top");
    let section = doc.create_element("h2");
    section.set_attribute("id", "section-2");
    let target = InMemorySnapshot::from_elements(vec![title, section]);

    // First a preview render: the navigation has not been confirmed yet, so
    // the root element gets the preview marker while this content is shown.
    let mut preview = ReplaceRenderer::new(doc.clone(), target.clone());
    preview.preview = true;
    view.render(preview).await?;
    println!("preview rendered, document now has {} elements", doc.children().len());

    // The navigation was confirmed: render the same snapshot for real, which
    // also clears the preview marker.
    view.render(ReplaceRenderer::new(doc.clone(), target.clone())).await?;

    // Restore the scroll target the destination URL asks for.
    let url = Url::parse("https://example.com/article#section-2").expect("valid URL");
    if let Some(anchor) = location::anchor(&url) {
        view.scroll_to_anchor(&anchor);
    }

    // A renderer may decide nothing needs to change; the delegate hears
    // about it as an invalidation instead of a render pair.
    let mut unchanged = ReplaceRenderer::new(doc.clone(), target);
    unchanged.render_needed = false;
    view.render(unchanged).await?;

    // Drain what the view published along the way.
    while let Ok(event) = event_rx.try_recv() {
        println!("[event] {event:?}");
    }

    println!("Done. Exiting.");
    Ok(())
}

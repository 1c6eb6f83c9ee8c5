use news_extract::{extract, ExtractionStrategy, FallbackEngine, Options, PrimaryEngine, SourceEngine};

fn words(marker: &str, n: usize) -> String {
    let mut text = vec![marker.to_string()];
    text.extend((1..n).map(|i| format!("w{i}")));
    text.join(" ")
}

/// A short page in a generic `content` wrapper: too small for the
/// density scorer, found by the structural container search.
fn short_wrapped_page() -> String {
    format!(
        r#"<html><head><title>Brief | Daily</title></head><body>
            <header>Masthead</header>
            <div class="story-wrap content"><p>{}</p></div>
            <footer>Copyright</footer>
        </body></html>"#,
        words("BRIEF", 25)
    )
}

#[test]
fn fallback_wins_when_primary_finds_no_container() {
    let html = short_wrapped_page();

    let primary = PrimaryEngine::default().attempt(&html, None).unwrap();
    assert!(primary.text.is_empty());

    let result = extract(&html).expect("extraction failed");
    assert_eq!(result.source_engine, SourceEngine::Fallback);
    assert_eq!(result.word_count, 25);
    assert!(result.text.starts_with("BRIEF"));
    assert!(!result.text.contains("Masthead"));
    assert!(!result.text.contains("Copyright"));
}

#[test]
fn fallback_keeps_link_heavy_articles_the_primary_rejects() {
    let links: String = (0..30)
        .map(|i| format!(r#"<a href="/topic/{i}">linked phrase {i}</a> "#))
        .collect();
    let html = format!(
        r#"<html><head>
            <script type="application/ld+json">
              {{"@type": "NewsArticle", "headline": "Roundup", "author": {{"@type": "Person", "name": "Ada Quill"}}}}
            </script>
        </head><body><article><p>LINKED {links}</p></article></body></html>"#
    );

    let primary = PrimaryEngine::default().attempt(&html, None).unwrap();
    assert!(primary.text.is_empty());
    assert_eq!(primary.metadata.author.as_deref(), Some("Ada Quill"));

    let result = extract(&html).expect("extraction failed");
    assert_eq!(result.source_engine, SourceEngine::Fallback);
    assert!(result.text.starts_with("LINKED linked phrase 0"));
    // The fallback reads only title and description; the author comes from
    // the rejected primary output.
    assert_eq!(result.metadata.author.as_deref(), Some("Ada Quill"));
}

#[test]
fn fallback_respects_min_word_count() {
    let html = short_wrapped_page();
    let options = Options {
        min_word_count: 40,
        ..Options::default()
    };
    assert!(news_extract::extract_with_options(&html, None, &options).is_err());
}

#[test]
fn fallback_without_container_yields_nothing() {
    let html = format!("<html><body><div><p>{}</p></div></body></html>", words("LOOSE", 30));
    let fallback = FallbackEngine::default().attempt(&html, None).unwrap();
    assert!(fallback.text.is_empty());
}

#[test]
fn fallback_output_excludes_nav_and_footer_links() {
    let html = format!(
        r#"<html><body>
            <nav><a href="/">NAV_HOME</a><a href="/world">NAV_WORLD</a></nav>
            <main><p>{}</p></main>
            <footer><a href="/terms">FOOTER_TERMS</a><a href="/privacy">FOOTER_PRIVACY</a></footer>
        </body></html>"#,
        words("PROSE", 30)
    );

    let fallback = FallbackEngine::default().attempt(&html, None).unwrap();
    assert!(fallback.text.starts_with("PROSE"));
    assert_eq!(news_extract::text::word_count(&fallback.text), 30);
    for chrome in ["NAV_HOME", "NAV_WORLD", "FOOTER_TERMS", "FOOTER_PRIVACY"] {
        assert!(!fallback.text.contains(chrome), "{chrome} leaked into fallback text");
    }
}

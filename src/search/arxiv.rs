//! arXiv API client
//!
//! Full-text search against the public export API, which answers with an
//! Atom feed. See: https://info.arxiv.org/help/api/user-manual.html

use super::{PaperSource, SearchError, MAX_RESULTS};
use crate::models::PaperRecord;
use async_trait::async_trait;
use quick_xml::events::Event;
use quick_xml::Reader;
use reqwest::Client;
use tracing::{debug, info, warn};

/// Client for the arXiv query API
#[derive(Clone)]
pub struct ArxivClient {
    http: Client,
    base: String,
}

impl ArxivClient {
    pub fn with_base(base: &str) -> Self {
        Self {
            http: Client::new(),
            base: base.to_string(),
        }
    }

    /// Fetch the raw feed for a query. `None` means the request did not succeed.
    async fn fetch_feed(&self, query: &str) -> Option<String> {
        let search_query = format!("all:{}", query);
        let max_results = MAX_RESULTS.to_string();

        let resp = match self
            .http
            .get(&self.base)
            .query(&[
                ("search_query", search_query.as_str()),
                ("start", "0"),
                ("max_results", max_results.as_str()),
            ])
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                warn!(query = %query, error = %e, "arXiv request failed");
                return None;
            }
        };

        let status = resp.status();
        if !status.is_success() {
            warn!(query = %query, status = %status, "arXiv API returned an error status");
            return None;
        }

        match resp.text().await {
            Ok(text) => Some(text),
            Err(e) => {
                warn!(query = %query, error = %e, "Failed to read arXiv response body");
                None
            }
        }
    }
}

#[async_trait]
impl PaperSource for ArxivClient {
    fn name(&self) -> &str {
        "arxiv"
    }

    async fn search(&self, query: &str) -> Result<Vec<PaperRecord>, SearchError> {
        info!(query = %query, "Searching arXiv");

        let Some(feed) = self.fetch_feed(query).await else {
            return Ok(Vec::new());
        };

        let papers = parse_atom_feed(&feed)?;
        info!(query = %query, count = papers.len(), "arXiv search completed");
        Ok(papers)
    }
}

#[derive(Clone, Copy)]
enum Field {
    Title,
    Summary,
    Id,
}

#[derive(Default)]
struct EntryFields {
    title: Option<String>,
    summary: Option<String>,
    id: Option<String>,
}

impl EntryFields {
    fn slot(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Title => &mut self.title,
            Field::Summary => &mut self.summary,
            Field::Id => &mut self.id,
        }
    }

    fn into_record(self, index: usize) -> Result<PaperRecord, SearchError> {
        let missing = |name: &str| SearchError::Parse(format!("entry {} has no <{}>", index, name));
        let title = self.title.ok_or_else(|| missing("title"))?;
        let summary = self.summary.ok_or_else(|| missing("summary"))?;
        let id = self.id.ok_or_else(|| missing("id"))?;

        Ok(PaperRecord {
            title: title.split_whitespace().collect::<Vec<_>>().join(" "),
            summary_text: summary.trim().to_string(),
            link: id.trim().to_string(),
        })
    }
}

/// Direct children of `<entry>` that a record is built from; the namespace
/// prefix is ignored.
fn entry_field(local_name: &[u8]) -> Option<Field> {
    match local_name {
        b"title" => Some(Field::Title),
        b"summary" => Some(Field::Summary),
        b"id" => Some(Field::Id),
        _ => None,
    }
}

/// Parse an Atom feed into paper records.
///
/// Every `<entry>` must carry a title, summary and id. An entry missing any of
/// them fails the whole feed, as does malformed XML. Text inside markup nested
/// in a field is kept.
pub fn parse_atom_feed(xml: &str) -> Result<Vec<PaperRecord>, SearchError> {
    let mut reader = Reader::from_str(xml);
    let mut buf = Vec::new();
    let mut papers = Vec::new();

    let mut entry: Option<EntryFields> = None;
    // Nesting depth below the current <entry>. Fields are chosen at depth 1 and
    // collect text from everything beneath them.
    let mut depth = 0usize;
    let mut target: Option<Field> = None;

    loop {
        let event = reader
            .read_event_into(&mut buf)
            .map_err(|e| SearchError::Parse(format!("malformed feed at {}: {}", reader.buffer_position(), e)))?;

        match event {
            Event::Start(e) => {
                let name = e.local_name();
                match entry.as_mut() {
                    None if name.as_ref() == b"entry" => {
                        entry = Some(EntryFields::default());
                        depth = 0;
                    }
                    Some(fields) => {
                        depth += 1;
                        if depth == 1 {
                            target = entry_field(name.as_ref());
                            if let Some(field) = target {
                                fields.slot(field).get_or_insert_with(String::new);
                            }
                        }
                    }
                    None => {}
                }
            }
            Event::Empty(e) => {
                let name = e.local_name();
                match entry.as_mut() {
                    None if name.as_ref() == b"entry" => {
                        papers.push(EntryFields::default().into_record(papers.len())?);
                    }
                    Some(fields) if depth == 0 => {
                        if let Some(field) = entry_field(name.as_ref()) {
                            fields.slot(field).get_or_insert_with(String::new);
                        }
                    }
                    _ => {}
                }
            }
            Event::Text(t) => {
                if let (Some(fields), Some(field)) = (entry.as_mut(), target) {
                    let text = t
                        .unescape()
                        .map_err(|e| SearchError::Parse(format!("bad text content: {}", e)))?;
                    fields.slot(field).get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::CData(c) => {
                if let (Some(fields), Some(field)) = (entry.as_mut(), target) {
                    let text = String::from_utf8_lossy(&c.into_inner()).into_owned();
                    fields.slot(field).get_or_insert_with(String::new).push_str(&text);
                }
            }
            Event::End(_) => {
                if entry.is_some() {
                    if depth == 0 {
                        if let Some(fields) = entry.take() {
                            papers.push(fields.into_record(papers.len())?);
                        }
                    } else {
                        depth -= 1;
                        if depth == 0 {
                            target = None;
                        }
                    }
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    debug!(count = papers.len(), "Parsed arXiv feed");
    Ok(papers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const FEED: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<feed xmlns="http://www.w3.org/2005/Atom" xmlns:arxiv="http://arxiv.org/schemas/atom">
  <title type="html">ArXiv Query: search_query=all:graph neural networks</title>
  <id>http://arxiv.org/api/query-id</id>
  <entry>
    <id>http://arxiv.org/abs/1812.08434v6</id>
    <title>Graph Neural Networks:
      A Review of Methods and Applications</title>
    <summary>Lots of learning tasks require dealing with graph data &amp; more.</summary>
    <author><name>Jie Zhou</name></author>
    <link href="http://arxiv.org/abs/1812.08434v6" rel="alternate" type="text/html"/>
    <arxiv:primary_category term="cs.LG" scheme="http://arxiv.org/schemas/atom"/>
  </entry>
  <entry>
    <id>http://arxiv.org/abs/1901.00596v4</id>
    <title>A Comprehensive Survey on Graph Neural Networks</title>
    <summary>Deep learning has revolutionized many machine learning tasks.</summary>
    <author><name>Zonghan Wu</name></author>
  </entry>
</feed>"#;

    #[test]
    fn test_parse_feed_entries() {
        let papers = parse_atom_feed(FEED).unwrap();
        assert_eq!(papers.len(), 2);
        assert_eq!(
            papers[0].title,
            "Graph Neural Networks: A Review of Methods and Applications"
        );
        assert_eq!(
            papers[0].summary_text,
            "Lots of learning tasks require dealing with graph data & more."
        );
        assert_eq!(papers[0].link, "http://arxiv.org/abs/1812.08434v6");
        assert_eq!(papers[1].title, "A Comprehensive Survey on Graph Neural Networks");
    }

    #[test]
    fn test_parse_prefixed_namespace() {
        let feed = r#"<atom:feed xmlns:atom="http://www.w3.org/2005/Atom">
  <atom:entry>
    <atom:id>http://arxiv.org/abs/2101.00001v1</atom:id>
    <atom:title>Prefixed</atom:title>
    <atom:summary>Body</atom:summary>
  </atom:entry>
</atom:feed>"#;
        let papers = parse_atom_feed(feed).unwrap();
        assert_eq!(papers, vec![PaperRecord::new("Prefixed", "Body", "http://arxiv.org/abs/2101.00001v1")]);
    }

    #[test]
    fn test_empty_feed_has_no_papers() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom"><title>none</title></feed>"#;
        assert!(parse_atom_feed(feed).unwrap().is_empty());
    }

    #[test]
    fn test_entry_missing_summary_fails_whole_feed() {
        let feed = r#"<feed xmlns="http://www.w3.org/2005/Atom">
  <entry><id>a</id><title>ok</title><summary>fine</summary></entry>
  <entry><id>b</id><title>no abstract</title></entry>
</feed>"#;
        let err = parse_atom_feed(feed).unwrap_err();
        assert!(err.to_string().contains("summary"));
    }

    #[test]
    fn test_self_closing_entry_fails_whole_feed() {
        let feed = r#"<feed><entry><id>a</id><title>ok</title><summary>fine</summary></entry><entry/></feed>"#;
        let err = parse_atom_feed(feed).unwrap_err();
        assert!(matches!(err, SearchError::Parse(_)));
        assert!(err.to_string().contains("entry 1"));
    }

    #[test]
    fn test_nested_markup_keeps_field_text() {
        let feed = r#"<feed><entry><id>x</id><title>Top</title><summary>before <i>mid</i> after</summary></entry></feed>"#;
        let papers = parse_atom_feed(feed).unwrap();
        assert_eq!(papers[0].summary_text, "before mid after");
        assert_eq!(papers[0].title, "Top");
    }

    #[test]
    fn test_author_name_does_not_leak_into_fields() {
        let feed = r#"<feed><entry><id>x</id><author><title>nested</title></author><title>Top</title><summary>S</summary></entry></feed>"#;
        let papers = parse_atom_feed(feed).unwrap();
        assert_eq!(papers[0].title, "Top");
    }

    #[test]
    fn test_malformed_xml_is_parse_error() {
        let feed = r#"<feed><entry><id>x</title></entry></feed>"#;
        assert!(matches!(parse_atom_feed(feed), Err(SearchError::Parse(_))));
    }

    #[tokio::test]
    async fn test_search_sends_capped_query() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::AllOf(vec![
                Matcher::UrlEncoded("search_query".into(), "all:graph neural networks".into()),
                Matcher::UrlEncoded("start".into(), "0".into()),
                Matcher::UrlEncoded("max_results".into(), "5".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/atom+xml")
            .with_body(FEED)
            .create_async()
            .await;

        let client = ArxivClient::with_base(&format!("{}/api/query", server.url()));
        let papers = client.search("graph neural networks").await.unwrap();

        mock.assert_async().await;
        assert_eq!(papers.len(), 2);
    }

    #[tokio::test]
    async fn test_server_error_yields_empty() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/api/query")
            .match_query(Matcher::Any)
            .with_status(500)
            .with_body("internal error")
            .create_async()
            .await;

        let client = ArxivClient::with_base(&format!("{}/api/query", server.url()));
        let papers = client.search("anything").await.unwrap();
        assert!(papers.is_empty());
    }

    #[tokio::test]
    async fn test_unreachable_host_yields_empty() {
        let client = ArxivClient::with_base("http://127.0.0.1:9/api/query");
        let papers = client.search("anything").await.unwrap();
        assert!(papers.is_empty());
    }
}

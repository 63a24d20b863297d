use async_trait::async_trait;
use keyword_maestro::export;
use keyword_maestro::gateway::{GenerationError, KeywordGateway};
use keyword_maestro::record::{ContentIdeas, KeywordRecord};
use keyword_maestro::session::Session;
use keyword_maestro::sort::SortField;

struct CannedGateway;

#[async_trait]
impl KeywordGateway for CannedGateway {
    async fn generate_keywords(
        &self,
        _topic: &str,
        _country: &str,
    ) -> Result<Vec<KeywordRecord>, GenerationError> {
        Ok(vec![
            KeywordRecord::new("cooking for beginners", 5000, 20),
            KeywordRecord::new("easy cooking tips", 12000, 45),
            KeywordRecord::new("cooking 2020", 100, 80),
        ])
    }

    async fn generate_content_ideas(
        &self,
        keyword: &str,
        _topic: &str,
    ) -> Result<ContentIdeas, GenerationError> {
        Ok(ContentIdeas {
            titles: vec![
                format!("{keyword} masterclass"),
                format!("{keyword} in 2024"),
                format!("why {keyword} matters"),
            ],
            description: format!("Everything about {keyword}. Subscribe for more."),
        })
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    println!("Walking a session through the basic search flow...");

    let mut session = Session::new(CannedGateway, "United States");
    session.submit("cooking").await;

    println!("\n=== Default view (search volume descending) ===");
    let view = session.view();
    for record in &view.rows {
        println!("{:<30} {:>8} {:>4}", record.keyword, record.search_volume, record.competition);
    }

    let order: Vec<_> = view.rows.iter().map(|r| r.keyword.as_str()).collect();
    if order == ["easy cooking tips", "cooking for beginners", "cooking 2020"] {
        println!("✅ Default ordering is correct");
    } else {
        println!("❌ Unexpected default ordering: {order:?}");
    }

    println!("\n=== Excluding \"2020\" ===");
    session.criteria_mut().exclude_terms = "2020".to_string();
    let view = session.view();
    println!("{} keywords remain", view.total_filtered);
    if view.total_filtered == 2 {
        println!("✅ Exclude filter dropped the right record");
    } else {
        println!("❌ Expected 2 remaining keywords");
    }

    println!("\n=== Sorting by keyword (toggle twice for descending) ===");
    session.toggle_sort(SortField::Keyword);
    session.toggle_sort(SortField::Keyword);
    for record in &session.view().rows {
        println!("{}", record.keyword);
    }

    println!("\n=== CSV export of the filtered set ===");
    session.toggle_sort(SortField::SearchVolume);
    session.toggle_sort(SortField::SearchVolume);
    let csv = export::csv_string(&session.processed());
    println!("{csv}");
    let expected = "Keyword,Search Volume,Competition\n\"easy cooking tips\",12000,45\n\"cooking for beginners\",5000,20";
    if csv == expected {
        println!("✅ CSV matches the expected layout");
    } else {
        println!("❌ CSV did not match:\nexpected:\n{expected}");
    }

    println!("\n=== Content ideas for the top keyword ===");
    let top = session.view().rows[0].keyword.clone();
    let ideas = session.content_ideas(&top).await?;
    for title in &ideas.titles {
        println!("- {title}");
    }
    println!("{}", ideas.description);

    Ok(())
}

//! Terminal presenter
//!
//! Drives one quiz session over a line-oriented input/output pair. All quiz
//! rules live in `QuizFlow`; this module only renders and forwards input.

use std::path::Path;
use std::sync::Arc;

use anyhow::Result;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, Lines};
use tracing::{error, info, warn};

use crate::config::{AnalyticsMode, Config};
use crate::error::QuizError;
use crate::models::{load_catalog, Catalog, Category, Product};
use crate::services::{
    classifier::group_heading, AgeBand, AnalyticsSink, MemorySink, NoopSink, ShareLinks,
    TracingSink,
};
use crate::utils::logging;
use crate::workflow::{AgeOutcome, QuizFlow, Screen};

/// Application
pub struct App {
    config: Config,
    catalog: Arc<Catalog>,
    analytics: Arc<dyn AnalyticsSink>,
    recorder: Option<Arc<MemorySink>>,
    links: ShareLinks,
}

/// What the presenter does after handling one line
enum Step {
    Continue,
    Quit,
}

impl App {
    /// Load the catalog and pick the analytics sink
    pub async fn initialize(config: Config) -> Result<Self> {
        let catalog = load_catalog(Path::new(&config.catalog_path)).await?;
        Ok(Self::with_catalog(config, catalog))
    }

    pub fn with_catalog(config: Config, catalog: Catalog) -> Self {
        logging::log_startup(&config, catalog.len());

        let recorder = match config.analytics {
            AnalyticsMode::Memory => Some(Arc::new(MemorySink::new())),
            _ => None,
        };
        let analytics: Arc<dyn AnalyticsSink> = match (&recorder, config.analytics) {
            (Some(sink), _) => sink.clone(),
            (None, AnalyticsMode::None) => Arc::new(NoopSink),
            (None, _) => Arc::new(TracingSink),
        };

        Self {
            links: ShareLinks::new(&config),
            config,
            catalog: Arc::new(catalog),
            analytics,
            recorder,
        }
    }

    /// Run a session on stdin/stdout
    pub async fn run(&self) -> Result<()> {
        let stdin = tokio::io::BufReader::new(tokio::io::stdin());
        let mut stdout = tokio::io::stdout();
        self.run_with(stdin, &mut stdout).await
    }

    /// Run a session on any line source and sink
    pub async fn run_with<R, W>(&self, input: R, output: &mut W) -> Result<()>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        let mut lines = input.lines();
        let mut flow = QuizFlow::new(Arc::clone(&self.catalog), Arc::clone(&self.analytics));

        loop {
            render(&flow, output).await?;
            let Some(line) = read_line(&mut lines, output).await? else {
                info!("input closed, ending session");
                break;
            };

            let step = match flow.screen() {
                Screen::Age => self.handle_age(&mut flow, &line, &mut lines, output).await?,
                Screen::Products => handle_products(&mut flow, &line, output).await?,
                Screen::Results => handle_results(&mut flow, &line, output).await?,
                Screen::Cta => self.handle_cta(&mut flow, &line, output).await?,
            };
            if let Step::Quit = step {
                break;
            }
        }

        if let Some(summary) = flow.summary()? {
            logging::log_session_summary(&summary);
        }
        if let Some(recorder) = &self.recorder {
            for event in recorder.events() {
                info!("📈 {} {}", event.name, event.payload);
            }
        }
        Ok(())
    }

    async fn handle_age<R, W>(
        &self,
        flow: &mut QuizFlow,
        line: &str,
        lines: &mut Lines<R>,
        output: &mut W,
    ) -> Result<Step>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin,
    {
        match flow.submit_age(line) {
            Ok(AgeOutcome::Advanced { .. }) => {}
            Ok(AgeOutcome::NeedsConfirmation { band, .. }) => {
                let message = band.warning_message().unwrap_or_default();
                write_line(output, message).await?;
                let prompt = match band {
                    AgeBand::TooYoung => "בכל זאת רוצה לבדוק מוצרים? (y/n)",
                    _ => "המשיכי לבחירת מוצרים? (y/n)",
                };
                write_line(output, prompt).await?;
                match read_line(lines, output).await? {
                    Some(answer) if is_yes(&answer) => {
                        flow.confirm_continue()?;
                    }
                    Some(_) => {}
                    None => return Ok(Step::Quit),
                }
            }
            Err(e) if e.is_user_error() => {
                write_line(output, &format!("⚠️ {}", e)).await?;
            }
            Err(e) => return Err(e.into()),
        }
        Ok(Step::Continue)
    }

    async fn handle_cta<W>(&self, flow: &mut QuizFlow, line: &str, output: &mut W) -> Result<Step>
    where
        W: AsyncWrite + Unpin,
    {
        match line {
            "share" => {
                let url = self.links.share_link(self.links.quiz_url())?;
                flow.share_clicked(self.links.quiz_url())?;
                write_line(output, url.as_str()).await?;
            }
            "join" => {
                flow.community_clicked(self.links.community_link())?;
                write_line(output, self.links.community_link()).await?;
            }
            "lead" => match flow.summary()? {
                Some(summary) => {
                    let url = self.links.lead_link(&summary)?;
                    write_line(output, url.as_str()).await?;
                }
                None => warn!("⚠️ no summary available for lead link"),
            },
            "restart" => flow.restart(),
            "quit" | "q" => return Ok(Step::Quit),
            other => write_line(output, &format!("unknown command: {}", other)).await?,
        }
        Ok(Step::Continue)
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

async fn handle_products<W>(flow: &mut QuizFlow, line: &str, output: &mut W) -> Result<Step>
where
    W: AsyncWrite + Unpin,
{
    if let Some(label) = line.strip_prefix("f ") {
        flow.set_category(Category::from_label(label))?;
        return Ok(Step::Continue);
    }

    match line {
        "back" => {
            flow.back()?;
        }
        "done" => {
            // the controller accepts empty selections; the screen does not
            if flow.draft_selection().is_empty() {
                write_line(output, "בחרי לפחות מוצר אחד").await?;
            } else {
                match flow.submit_draft() {
                    Ok(_) => {}
                    Err(e @ QuizError::DataIntegrity { .. }) => {
                        // refused; the user stays on Products and can deselect
                        error!("❌ selection refused: {}", e);
                        write_line(output, &format!("❌ {}", e)).await?;
                    }
                    Err(e) => return Err(e.into()),
                }
            }
        }
        other => {
            let picked = other
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .and_then(|i| flow.visible_products().get(i).map(|p| p.id.clone()));
            match picked {
                Some(id) => {
                    flow.toggle_product(&id)?;
                }
                None => write_line(output, &format!("unknown command: {}", other)).await?,
            }
        }
    }
    Ok(Step::Continue)
}

async fn handle_results<W>(flow: &mut QuizFlow, line: &str, output: &mut W) -> Result<Step>
where
    W: AsyncWrite + Unpin,
{
    match line {
        "back" => {
            flow.back()?;
        }
        "next" => flow.continue_to_cta()?,
        other => write_line(output, &format!("unknown command: {}", other)).await?,
    }
    Ok(Step::Continue)
}

async fn render<W>(flow: &QuizFlow, output: &mut W) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    let screen = flow.screen();
    let mut text = format!("\n[{}]\n", screen.progress_label());

    match screen {
        Screen::Age => {
            text.push_str("המבחן שיגלה אם הסקינקייר שלך באמת מתאים לך!\n");
            text.push_str("בת כמה את?\n");
        }
        Screen::Products => {
            let bar: Vec<String> = Category::filter_bar()
                .iter()
                .map(|c| {
                    if c == flow.active_category() {
                        format!("[{}]", c)
                    } else {
                        c.to_string()
                    }
                })
                .collect();
            text.push_str(&format!("בחרי את המוצרים שלך ({} נבחרו)\n", flow.draft_selection().len()));
            text.push_str(&format!("{}\n", bar.join(" | ")));

            let visible = flow.visible_products();
            if visible.is_empty() {
                text.push_str("אין מוצרים בקטגוריה זו\n");
            }
            for (i, product) in visible.iter().enumerate() {
                let mark = if flow.draft_selection().contains(&product.id) {
                    "x"
                } else {
                    " "
                };
                text.push_str(&format!(
                    "{:>2}. [{}] {} ({})\n",
                    i + 1,
                    mark,
                    product.name,
                    product.product_type
                ));
            }
            text.push_str("<number> toggle, f <category> filter, done, back\n");
        }
        Screen::Results => {
            let groups = flow.results()?;
            let counts = groups.counts();
            text.push_str(&format!("התוצאות שלך - בדקנו {} מוצרים\n", counts.total()));
            if flow.show_young_reminder() {
                text.push_str("זכרי: בגילך אין חובה להשתמש במוצרי טיפוח.\n");
            }
            text.push_str(&format!(
                "מתאימים {} | לא מתאימים {} | מוגבלים {}\n",
                counts.approved, counts.not_approved, counts.limited
            ));
            for (status, products) in groups.by_severity() {
                if products.is_empty() {
                    continue;
                }
                text.push_str(&format!("\n{}\n", group_heading(&status)));
                for product in products {
                    text.push_str(&render_result(product));
                }
            }
            text.push_str("next, back\n");
        }
        Screen::Cta => {
            text.push_str("הצטרפי לקהילת ה-Skincare של VaniBlu\n");
            text.push_str("share, join, lead, restart, quit\n");
        }
    }

    output.write_all(text.as_bytes()).await?;
    output.flush().await?;
    Ok(())
}

fn render_result(product: &Product) -> String {
    let mut text = format!("- {} [{}]\n", product.name, product.status.label());
    if let Some(ingredients) = product.problematic_ingredients() {
        text.push_str(&format!("    רכיבים בעייתיים: {}\n", ingredients));
    }
    if let Some(reason) = product.reason() {
        text.push_str(&format!("    {}\n", reason));
    }
    if let Some(note) = product.usage_note() {
        text.push_str(&format!("    💡 {}\n", note));
    }
    text
}

async fn read_line<R, W>(lines: &mut Lines<R>, output: &mut W) -> Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    output.write_all(b"> ").await?;
    output.flush().await?;
    Ok(lines.next_line().await?.map(|l| l.trim().to_string()))
}

async fn write_line<W>(output: &mut W, line: &str) -> Result<()>
where
    W: AsyncWrite + Unpin,
{
    output.write_all(line.as_bytes()).await?;
    output.write_all(b"\n").await?;
    Ok(())
}

fn is_yes(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes" | "כן")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProductStatus, ProductType};

    fn app() -> App {
        let catalog = Catalog::new(vec![
            Product::new("p1", "סבון עדין", ProductType::Soap, ProductStatus::Approved),
            Product::new("p2", "קרם רטינול", ProductType::Moisturizer, ProductStatus::NotApproved),
        ])
        .unwrap();
        let config = Config {
            analytics: AnalyticsMode::Memory,
            ..Config::default()
        };
        App::with_catalog(config, catalog)
    }

    fn run_script(app: &App, script: &str) -> String {
        let mut output: Vec<u8> = Vec::new();
        tokio_test::block_on(app.run_with(script.as_bytes(), &mut output)).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_full_session_script() {
        let app = app();
        let out = run_script(&app, "13\n1\n2\ndone\nnext\nlead\nquit\n");

        assert!(out.contains("[שלב 1 מתוך 4]"));
        assert!(out.contains("[שלב 3 מתוך 4]"));
        assert!(out.contains("מתאימים 1 | לא מתאימים 1 | מוגבלים 0"));
        assert!(out.contains("https://wa.me/972545779912?text="));

        let recorder = app.recorder.as_ref().unwrap();
        assert_eq!(recorder.named(crate::services::EventName::QuizCompleted).len(), 1);
    }

    #[test]
    fn test_empty_selection_is_blocked_by_screen() {
        let app = app();
        let out = run_script(&app, "14\ndone\n");
        assert!(out.contains("בחרי לפחות מוצר אחד"));
    }

    #[test]
    fn test_age_warning_then_confirm() {
        let app = app();
        let out = run_script(&app, "9\ny\nf סבון\n1\ndone\n");
        assert!(out.contains("בגילך הצעיר"));
        assert!(out.contains("[סבון]"));
        assert!(out.contains("זכרי: בגילך אין חובה"));
    }

    #[test]
    fn test_invalid_age_reprompts() {
        let app = app();
        let out = run_script(&app, "abc\n200\n");
        assert!(out.contains("not a whole number"));
        assert!(out.contains("outside 1-120"));
    }

    #[test]
    fn test_bad_status_keeps_user_on_products() {
        let catalog = Catalog::new(vec![
            Product::new("ok", "סבון", ProductType::Soap, ProductStatus::Approved),
            Product::new("bad", "סרום", ProductType::Serum, ProductStatus::Unrecognized("tbd".into())),
        ])
        .unwrap();
        let app = App::with_catalog(Config::default(), catalog);

        let out = run_script(&app, "13\n2\ndone\n2\n1\ndone\n");
        assert!(out.contains("product 'bad' has unrecognized status 'tbd'"));
        assert!(out.contains("[שלב 3 מתוך 4]"));
        assert!(out.contains("מתאימים 1 | לא מתאימים 0 | מוגבלים 0"));
    }
}

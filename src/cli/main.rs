use anyhow::Result;
use briefly::common::{default_summary_file_name, save_summary};
use briefly::image2text::{OcrConfig, TesseractEngine};
use briefly::process::{process_image, process_text, ProcessorConfig, SummaryReport};
use briefly::summarize::{HttpSummarizer, SummarizerConfig, SummaryLength};
use briefly::upload::image_from_path;
use briefly_app::common::init_logger_exe;
use clap::{ArgGroup, Parser};
use std::path::PathBuf;
use tokio::io::AsyncReadExt;

#[derive(Parser)]
#[command(version, about = "A CLI tool to summarize pasted text or the text in an image", long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["text", "text_file", "stdin", "image"])))]
struct Cli {
    #[arg(long, help = "text to summarize")]
    text: Option<String>,
    #[arg(long, help = "read the text to summarize from a file")]
    text_file: Option<PathBuf>,
    #[arg(long, help = "read the text to summarize from stdin")]
    stdin: bool,
    #[arg(long, help = "input image in png or jpeg format")]
    image: Option<PathBuf>,
    #[arg(long, default_value = "medium", help = "summary length: short, medium or long")]
    length: String,
    #[arg(long, env = "BRIEFLY_MODEL", help = "model name on the inference endpoint [default: t5-small]")]
    model: Option<String>,
    #[arg(long, env = "BRIEFLY_SUMMARIZER_URL", help = "full URL of the summarization endpoint")]
    url: Option<String>,
    #[arg(long, env = "BRIEFLY_API_KEY", hide_env_values = true, help = "bearer token for the endpoint")]
    api_key: Option<String>,
    #[arg(long, help = "seconds to wait for the model")]
    timeout: Option<u64>,
    #[arg(long, help = "tesseract language", default_value = "eng")]
    lang: String,
    #[arg(long, help = "tesseract page segmentation mode")]
    psm: Option<u32>,
    #[arg(long, help = "tesseract engine mode")]
    oem: Option<u32>,
    #[arg(long, help = "image resolution hint in dots per inch")]
    dpi: Option<u32>,
    #[arg(
        long,
        num_args = 0..=1,
        value_name = "PATH",
        help = "save the summary to a file (summary.txt or image_summary.txt by default)"
    )]
    save: Option<Option<PathBuf>>,
    #[arg(long, help = "print the full report as JSON")]
    json: bool,
}

impl Cli {
    fn summarizer_config(&self) -> SummarizerConfig {
        SummarizerConfig {
            timeout_secs: self.timeout,
            ..SummarizerConfig::new(self.url.clone(), self.api_key.clone(), self.model.clone())
        }
    }

    fn ocr_config(&self) -> OcrConfig {
        OcrConfig::new(Some(self.lang.clone()), self.dpi, self.psm, self.oem)
    }

    fn processor_config(&self) -> ProcessorConfig {
        ProcessorConfig::new(
            SummaryLength::from(self.length.as_str()),
            self.ocr_config(),
            self.summarizer_config(),
        )
    }
}

async fn read_input_text(cli: &Cli) -> Result<Option<String>> {
    if let Some(text) = &cli.text {
        return Ok(Some(text.clone()));
    }
    if let Some(path) = &cli.text_file {
        let text = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| anyhow::anyhow!("Failed to read {}: {}", path.display(), e))?;
        return Ok(Some(text));
    }
    if cli.stdin {
        let mut text = String::new();
        tokio::io::stdin().read_to_string(&mut text).await?;
        return Ok(Some(text));
    }
    Ok(None)
}

fn print_report(report: &SummaryReport) {
    if let Some(extracted) = &report.extracted_text {
        println!("Extracted Text\n{}\n", extracted.trim_end());
    }
    println!("Summary\n{}\n", report.summary);
    println!("Summary Analytics");
    println!("  Original words: {}", report.analytics.original_words);
    println!("  Summary words:  {}", report.analytics.summary_words);
    println!("  Reduction:      {}%", report.analytics.reduction_label());
}

async fn run(cli: Cli) -> Result<()> {
    let config = cli.processor_config();
    let length = config.length;
    let summarizer = HttpSummarizer::new(&config.summarizer_config)?;
    log::debug!("Using summarization endpoint {}", summarizer.endpoint());

    let report = match read_input_text(&cli).await? {
        Some(text) => process_text(&summarizer, &text, length).await?,
        None => {
            // clap guarantees one input, so this is the image
            let path = cli
                .image
                .as_ref()
                .ok_or_else(|| anyhow::anyhow!("No input given"))?;
            let image = image_from_path(path)?;
            let ocr = TesseractEngine::new(config.ocr_config.clone());
            process_image(&ocr, &summarizer, &image, length).await?
        }
    };

    if cli.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if let Some(save) = &cli.save {
        let path = save
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_summary_file_name(report.input_type)));
        save_summary(&path, &report.summary)?;
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    init_logger_exe();
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        log::error!("{:#}", err);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_cli_requires_exactly_one_input() {
        assert!(Cli::try_parse_from(["briefly-cli"]).is_err());
        assert!(Cli::try_parse_from(["briefly-cli", "--text", "a", "--stdin"]).is_err());
        assert!(Cli::try_parse_from(["briefly-cli", "--image", "scan.png"]).is_ok());
    }

    #[test]
    fn test_cli_save_with_and_without_path() {
        let cli = Cli::try_parse_from(["briefly-cli", "--text", "a", "--save"]).unwrap();
        assert_eq!(cli.save, Some(None));

        let cli = Cli::try_parse_from(["briefly-cli", "--text", "a", "--save", "out.txt"]).unwrap();
        assert_eq!(cli.save, Some(Some(PathBuf::from("out.txt"))));

        let cli = Cli::try_parse_from(["briefly-cli", "--text", "a"]).unwrap();
        assert_eq!(cli.save, None);
    }

    #[test]
    fn test_cli_configs() {
        let cli = Cli::try_parse_from([
            "briefly-cli", "--image", "scan.jpg", "--length", "short", "--psm", "6", "--timeout", "30",
            "--url", "http://localhost:9000/generate",
        ])
        .unwrap();

        let config = cli.processor_config();
        assert_eq!(config.length, SummaryLength::Short);
        assert_eq!(config.ocr_config.psm, Some(6));
        assert_eq!(config.ocr_config.lang, "eng");
        assert_eq!(config.summarizer_config.timeout_secs, Some(30));
        assert_eq!(config.summarizer_config.endpoint(), "http://localhost:9000/generate");
    }
}

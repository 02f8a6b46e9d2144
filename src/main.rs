use book_catalogue::catalog::Catalog;
use book_catalogue::config;
use clap::Parser;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use tracing::{error, info};

/// 카탈로그 시드 파일을 불러와 요약을 출력한다.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {

    /// 카탈로그 시드(JSON) 파일 경로, 지정하지 않으면 설정의 `seed`를 사용한다.
    #[arg(short, long)]
    seed: Option<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    config::load_dotenv();
    let app_config = match config::load_config() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Cannot loading config: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let _guard = match config::log::set_global_logging_config(&app_config.log().cloned().unwrap_or_default()) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Cannot initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let Some(path) = args.seed.as_deref().or(app_config.seed()) else {
        error!("Seed file is not set, use --seed or CATALOG__SEED");
        return ExitCode::FAILURE;
    };

    let catalog = match File::open(path) {
        Ok(file) => Catalog::from_reader(BufReader::new(file)),
        Err(e) => {
            error!("Cannot open seed file {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };
    let catalog = match catalog {
        Ok(catalog) => catalog,
        Err(e) => {
            error!("Cannot load catalogue from {}: {}", path, e);
            return ExitCode::FAILURE;
        }
    };

    info!(seed = path, "catalogue ready");
    for book in catalog.books() {
        let publisher = book.publisher()
            .map(|p| p.name())
            .unwrap_or_else(|| "none".to_owned());
        let stock = catalog.inventory().find_stock_count(book.book_id());
        println!(
            "{} | publisher: {} | tags: [{}] | reviews: {} | stock: {}",
            book,
            publisher,
            book.tag_string(),
            book.number_of_reviews(),
            stock.map(|s| s.to_string()).unwrap_or_else(|| "-".to_owned()),
        );
    }

    ExitCode::SUCCESS
}

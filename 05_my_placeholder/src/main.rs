use std::sync::Arc;

use anyhow::{anyhow, Result};
use axum::{
    extract::{Extension, Path},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use clap::Parser;
use tower::ServiceBuilder;
use tower_http::{add_extension::AddExtensionLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod engine;
mod error;
mod name;

use engine::{Engine, SolidFill};
use error::{EncodeError, LimitError, ParseError};
use name::{Color, ImageConfig};

const CACHE_CONTROL_IMMUTABLE: &str = "public, max-age=31536000, immutable";
/// 默认背景色可以通过 `--background` 修改，只短时间缓存
const CACHE_CONTROL_FALLBACK: &str = "public, max-age=3600";

/// 一个用Rust实现的占位图片服务
#[derive(Parser, Debug)]
#[command(name = "placeholder", version = "1.0")]
struct Opts {
    /// 监听的主机
    #[arg(long, default_value = "localhost")]
    host: String,
    /// 监听的端口
    #[arg(long, default_value_t = 8000)]
    port: u16,
    /// 未指定颜色时的背景色，RRGGBB
    #[arg(long, default_value = "cccccc", value_parser = parse_background)]
    background: Color,
    /// 单张图片允许的最大像素数
    #[arg(long, default_value_t = 25_000_000)]
    max_pixels: u64,
}

fn parse_background(s: &str) -> Result<Color> {
    Ok(s.trim_start_matches('#').parse::<Color>()?)
}

#[derive(Debug)]
struct AppConfig {
    background: Color,
    max_pixels: u64,
}

type AppState = Arc<AppConfig>;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "my_placeholder=info,tower_http=info".into()),
        )
        .init();

    let opts = Opts::parse();
    let state = Arc::new(AppConfig {
        background: opts.background,
        max_pixels: opts.max_pixels,
    });

    let addr = tokio::net::lookup_host((opts.host.as_str(), opts.port))
        .await?
        .next()
        .ok_or_else(|| anyhow!("cannot resolve {}:{}", opts.host, opts.port))?;

    info!("Listening on {}", addr);
    axum::Server::bind(&addr)
        .serve(app(state).into_make_service())
        .await?;
    Ok(())
}

fn app(state: AppState) -> Router {
    Router::new().route("/*name", get(generate)).layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(AddExtensionLayer::new(state))
            .into_inner(),
    )
}

async fn generate(
    Path(name): Path<String>,
    Extension(state): Extension<AppState>,
) -> Result<Response, AppError> {
    let name = name.trim_start_matches('/');
    let config = ImageConfig::parse_with_fallback(name, state.background)?;
    engine::check_limits(&config, state.max_pixels)?;

    // 分配和编码都是 CPU 密集操作，不占用异步 worker
    let data = tokio::task::spawn_blocking(move || {
        SolidFill::new(config.width, config.height, config.background).generate(config.format)
    })
    .await
    .map_err(|e| AppError::Internal(e.to_string()))??;
    info!(
        width = config.width,
        height = config.height,
        background = %config.background,
        format = config.format.tag(),
        size = data.len(),
        "image generated"
    );

    let content_type = HeaderValue::from_str(config.format.content_type().as_ref())
        .map_err(|e| AppError::Internal(e.to_string()))?;
    let cache_control = if config.custom_background {
        CACHE_CONTROL_IMMUTABLE
    } else {
        CACHE_CONTROL_FALLBACK
    };
    Ok((
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, content_type),
            (
                header::CACHE_CONTROL,
                HeaderValue::from_static(cache_control),
            ),
        ],
        data,
    )
        .into_response())
}

#[derive(Debug)]
enum AppError {
    NotFound,
    BadRequest(String),
    Internal(String),
}

impl From<ParseError> for AppError {
    fn from(err: ParseError) -> Self {
        info!(error = %err, "image name not matched");
        AppError::NotFound
    }
}

impl From<LimitError> for AppError {
    fn from(err: LimitError) -> Self {
        warn!(error = %err, "image too large");
        AppError::BadRequest(err.to_string())
    }
}

impl From<EncodeError> for AppError {
    fn from(err: EncodeError) -> Self {
        AppError::Internal(err.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound => (StatusCode::NOT_FOUND, "not found").into_response(),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg).into_response(),
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal server error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal server error").into_response()
            }
        }
    }
}

use std::path::Path;
use std::sync::Arc;

use reststrategy_core::{load_recipe_str, recipe_warnings, RecipeError, RecipeFormat};
use reststrategy_exec::{
    ActionError, Engine, ExecutionError, ReqwestHttpClient, TracingLogger,
};
use serde::Serialize;
use tokio_util::sync::CancellationToken;

use crate::cmd::{read_recipe, report_parse_error};
use crate::exit_codes;
use crate::{EngineArgs, OutputArgs};

#[derive(Serialize)]
struct ExecuteResult {
    success: bool,
    actions: usize,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    errors: Vec<ActionErrorView>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ActionErrorView {
    action: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    host_path_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    is_retry_able: Option<bool>,
    message: String,
}

impl From<&ActionError> for ActionErrorView {
    fn from(e: &ActionError) -> Self {
        match e.as_diagnostic() {
            Some(d) => Self {
                action: d.name.clone(),
                status: Some(d.status),
                host_path_method: Some(d.host_path_method.clone()),
                is_retry_able: Some(d.proceed_fallback),
                message: d.message.clone(),
            },
            None => Self {
                action: e.action_name().to_string(),
                status: None,
                host_path_method: None,
                is_retry_able: None,
                message: e.to_string(),
            },
        }
    }
}

pub async fn execute_cmd(path: &Path, output: OutputArgs, engine_args: EngineArgs) -> i32 {
    let content = match read_recipe(path, &output) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let parsed = match load_recipe_str(&content, RecipeFormat::Auto) {
        Ok(p) => p,
        Err(RecipeError::Parse(e)) => return report_parse_error(&output, &e),
        Err(RecipeError::Validation(err)) => {
            let details: Vec<String> = err.violations.iter().map(ToString::to_string).collect();
            output.fail(&format!("validation failed: {}", details.join("; ")));
            return exit_codes::VALIDATION_FAILED;
        }
    };

    for w in recipe_warnings(&parsed.recipe) {
        tracing::warn!("{w}");
    }

    let actions = parsed.recipe.seed.len();
    let engine = Engine::new(Arc::new(TracingLogger))
        .with_http_client(Arc::new(ReqwestHttpClient::default()))
        .with_config(engine_args.engine_config())
        .with_recipe(parsed.recipe);

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::info!("interrupt received, cancelling in-flight requests");
            on_signal.cancel();
        }
    });

    let outcome = engine.execute(&cancel).await;
    report(&output, actions, outcome)
}

fn report(output: &OutputArgs, actions: usize, outcome: Result<(), ExecutionError>) -> i32 {
    let errors: Vec<ActionErrorView> = match &outcome {
        Ok(()) => Vec::new(),
        Err(e) => e.errors.iter().map(ActionErrorView::from).collect(),
    };
    let result = ExecuteResult {
        success: errors.is_empty(),
        actions,
        errors,
    };

    if output.is_human() {
        match &outcome {
            Ok(()) => println!("ok: {actions} actions executed"),
            Err(e) => {
                eprintln!("error: {} of {actions} actions failed", e.errors.len());
                eprintln!("{e}");
            }
        }
    } else {
        output.emit(&result);
    }

    if result.success {
        exit_codes::SUCCESS
    } else {
        exit_codes::ACTION_FAILED
    }
}

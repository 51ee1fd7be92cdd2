use napi::Result as NapiResult;
use napi_derive::napi;

/// Convert any Display error into a napi::Error.
fn to_napi_error(e: impl std::fmt::Display) -> napi::Error {
    napi::Error::from_reason(e.to_string())
}

// ---------------------------------------------------------------------------
// Estimator
// ---------------------------------------------------------------------------

/// Run the benchmark gap estimator. The web calculator calls this on every
/// slider change; the call is pure and cheap, so no debouncing is needed for
/// correctness.
#[napi]
pub fn estimate_benchmark_gap(input_json: String) -> NapiResult<String> {
    let input: benchgap_core::estimator::GapEstimatorInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output =
        benchgap_core::estimator::estimate_benchmark_gap(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Sensitivity
// ---------------------------------------------------------------------------

#[napi]
pub fn sweep_metric(input_json: String) -> NapiResult<String> {
    let input: benchgap_core::sensitivity::SweepInput =
        serde_json::from_str(&input_json).map_err(to_napi_error)?;
    let output = benchgap_core::sensitivity::sweep_metric(&input).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

// ---------------------------------------------------------------------------
// Demo profiles
// ---------------------------------------------------------------------------

#[napi]
pub fn list_profiles() -> NapiResult<String> {
    serde_json::to_string(&benchgap_core::profiles::all_profiles()).map_err(to_napi_error)
}

#[napi]
pub fn run_profile(slug: String) -> NapiResult<String> {
    let output = benchgap_core::profiles::run_profile(&slug).map_err(to_napi_error)?;
    serde_json::to_string(&output).map_err(to_napi_error)
}

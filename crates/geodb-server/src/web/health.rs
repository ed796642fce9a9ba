//! Health reporting. Never touches the dataset build, never fails.

use axum::{extract::State, Json};
use geodb_core::CacheState;
use serde::Serialize;
use sysinfo::{ProcessesToUpdate, System};

use super::AppState;

#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct MemoryUsage {
    /// Resident set size, bytes.
    pub rss: u64,
    pub virtual_memory: u64,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    /// Seconds since the server started.
    pub uptime: f64,
    pub memory: MemoryUsage,
    pub cache_initialized: bool,
    pub cache_state: CacheState,
    pub countries_count: usize,
}

pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    let memory = {
        let mut system = state.system.lock().await;
        process_memory(&mut system)
    };

    Json(HealthResponse {
        status: "ok",
        uptime: state.started.elapsed().as_secs_f64(),
        memory,
        cache_initialized: state.cache.is_ready(),
        cache_state: state.cache.state(),
        countries_count: state.cache.countries_count(),
    })
}

/// Memory of the current process; zeros when the platform won't say.
fn process_memory(system: &mut System) -> MemoryUsage {
    let Ok(pid) = sysinfo::get_current_pid() else {
        return MemoryUsage::default();
    };
    system.refresh_processes(ProcessesToUpdate::Some(&[pid]), true);
    system
        .process(pid)
        .map(|p| MemoryUsage {
            rss: p.memory(),
            virtual_memory: p.virtual_memory(),
        })
        .unwrap_or_default()
}

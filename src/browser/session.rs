use crate::{browser::config::{ConnectionOptions, LaunchOptions},
            dom::{PageDocument, MARK_CLASS},
            error::{LensError, Result},
            highlight::{DocumentView, HighlightOutcome, Highlighter, MarkPlan},
            keywords::RankOptions,
            snapshot::{self, PageSnapshot},
            tools::{ToolContext, ToolRegistry}};
use headless_chrome::{Browser, Tab};
use serde::Deserialize;
use std::{ffi::OsStr,
          sync::{Arc, Mutex, MutexGuard, PoisonError},
          time::Duration};

/// Serializes the page into the tree the extractor and planner work on
const CAPTURE_PAGE_JS: &str = include_str!("capture_page.js");

/// Function expression applied to a JSON-encoded mark plan
const APPLY_MARKS_JS: &str = include_str!("apply_marks.js");

/// Browser session that manages a Chrome/Chromium instance and the
/// highlight state of the page it is viewing
pub struct PageSession {
    /// The underlying headless_chrome Browser instance
    browser: Browser,

    /// Single-slot highlight state for the current document
    highlighter: Mutex<Highlighter>,

    /// Tool registry for executing page inspection tools
    tool_registry: ToolRegistry,
}

impl PageSession {
    /// Launch a new browser instance with the given options
    pub fn launch(options: LaunchOptions) -> Result<Self> {
        let mut launch_opts = headless_chrome::LaunchOptions::default();

        // Ignore default arguments to prevent detection by anti-bot services
        launch_opts.ignore_default_args.push(OsStr::new("--enable-automation"));
        launch_opts.args.push(OsStr::new("--disable-blink-features=AutomationControlled"));

        // Set the browser's idle timeout to 1 hour (default is 30 seconds) to prevent the session from closing too soon
        launch_opts.idle_browser_timeout = Duration::from_secs(60 * 60);

        // Configure headless mode
        launch_opts.headless = options.headless;

        // Set window size
        launch_opts.window_size = Some((options.window_width, options.window_height));

        // Set Chrome binary path if provided
        if let Some(path) = options.chrome_path {
            launch_opts.path = Some(path);
        }

        // Set user data directory if provided
        if let Some(dir) = options.user_data_dir {
            launch_opts.user_data_dir = Some(dir);
        }

        // Set sandbox mode
        launch_opts.sandbox = options.sandbox;

        // Launch browser
        let browser = Browser::new(launch_opts).map_err(|e| LensError::LaunchFailed(e.to_string()))?;

        browser.new_tab().map_err(|e| LensError::LaunchFailed(format!("Failed to create tab: {}", e)))?;

        Ok(Self {
            browser,
            highlighter: Mutex::new(Highlighter::new()),
            tool_registry: ToolRegistry::with_defaults(),
        })
    }

    /// Connect to an existing browser instance via WebSocket
    pub fn connect(options: ConnectionOptions) -> Result<Self> {
        let browser = Browser::connect(options.ws_url).map_err(|e| LensError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            browser,
            highlighter: Mutex::new(Highlighter::new()),
            tool_registry: ToolRegistry::with_defaults(),
        })
    }

    /// Launch a browser with default options
    pub fn new() -> Result<Self> {
        Self::launch(LaunchOptions::default())
    }

    /// Get the active tab
    pub fn tab(&self) -> Result<Arc<Tab>> {
        self.get_active_tab()
    }

    /// Get all tabs
    pub fn get_tabs(&self) -> Result<Vec<Arc<Tab>>> {
        let tabs = self
            .browser
            .get_tabs()
            .lock()
            .map_err(|e| LensError::TabOperationFailed(format!("Failed to get tabs: {}", e)))?
            .clone();

        Ok(tabs)
    }

    /// Get the currently active tab by checking the document visibility and focus state
    pub fn get_active_tab(&self) -> Result<Arc<Tab>> {
        let tabs = self.get_tabs()?;

        // First pass: check for both visibility and focus (strongest signal)
        for tab in &tabs {
            let result = tab.evaluate("document.visibilityState === 'visible' && document.hasFocus()", false);
            match result {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(e) => {
                    log::debug!("Failed to check tab status: {}", e);
                    continue;
                }
            }
        }

        // Second pass: check just for visibility (weaker signal, but better than nothing)
        for tab in &tabs {
            let result = tab.evaluate("document.visibilityState === 'visible'", false);
            match result {
                Ok(remote_object) => {
                    if let Some(value) = remote_object.value {
                        if value.as_bool().unwrap_or(false) {
                            return Ok(tab.clone());
                        }
                    }
                }
                Err(_) => continue,
            }
        }

        Err(LensError::TabOperationFailed("No active tab found".to_string()))
    }

    /// Get the underlying Browser instance
    pub fn browser(&self) -> &Browser {
        &self.browser
    }

    /// Navigate the active tab to a URL. The new document starts with no
    /// active highlight.
    pub fn navigate(&self, url: &str) -> Result<()> {
        self.tab()?
            .navigate_to(url)
            .map_err(|e| LensError::NavigationFailed(format!("Failed to navigate to {}: {}", url, e)))?;

        *self.highlighter_lock() = Highlighter::new();

        Ok(())
    }

    /// Wait for navigation to complete
    pub fn wait_for_navigation(&self) -> Result<()> {
        self.tab()?
            .wait_until_navigated()
            .map_err(|e| LensError::NavigationFailed(format!("Navigation timeout: {}", e)))?;

        Ok(())
    }

    /// Capture the active tab's document
    pub fn capture(&self) -> Result<PageDocument> {
        TabView::new(self.tab()?).capture()
    }

    /// Capture the active tab and extract its signal snapshot
    pub fn analyze(&self) -> Result<PageSnapshot> {
        Ok(snapshot::extract(&self.capture()?))
    }

    /// Capture and extract with custom keyword ranking options
    pub fn analyze_with(&self, options: &RankOptions) -> Result<PageSnapshot> {
        Ok(snapshot::extract_with(&self.capture()?, options))
    }

    /// Highlight every occurrence of a keyword in the active tab,
    /// replacing any previous highlight
    pub fn highlight(&self, keyword: &str) -> Result<HighlightOutcome> {
        let mut view = TabView::new(self.tab()?);
        self.highlighter_lock().apply(&mut view, keyword)
    }

    /// Remove all highlights from the active tab. The outcome's
    /// `match_count` reports how many marks came off.
    pub fn clear_highlights(&self) -> Result<HighlightOutcome> {
        let mut view = TabView::new(self.tab()?);
        self.highlighter_lock().remove(&mut view)
    }

    /// The keyword currently highlighted, if any
    pub fn active_keyword(&self) -> Option<String> {
        self.highlighter_lock().active_keyword().map(str::to_string)
    }

    fn highlighter_lock(&self) -> MutexGuard<'_, Highlighter> {
        // a poisoned slot is still just an Option<String>
        self.highlighter.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Get the tool registry
    pub fn tool_registry(&self) -> &ToolRegistry {
        &self.tool_registry
    }

    /// Get mutable tool registry
    pub fn tool_registry_mut(&mut self) -> &mut ToolRegistry {
        &mut self.tool_registry
    }

    /// Execute a tool by name
    pub fn execute_tool(&self, name: &str, params: serde_json::Value) -> Result<crate::tools::ToolResult> {
        let mut context = ToolContext::new(self);
        self.tool_registry.execute(name, params, &mut context)
    }

    /// Close the browser
    pub fn close(&self) -> Result<()> {
        // Note: The Browser struct doesn't have a public close method in headless_chrome
        // The browser will be closed when the Browser instance is dropped
        // We can close all tabs to effectively shut down
        let tabs = self.get_tabs()?;
        for tab in tabs {
            let _ = tab.close(false); // Ignore errors on individual tab closes
        }
        Ok(())
    }
}

impl Default for PageSession {
    fn default() -> Self {
        Self::new().expect("Failed to create default page session")
    }
}

/// A live tab as a mutable document view.
///
/// Capture ships the whole tree over as JSON; apply hands a validated plan
/// to the page-side script; clear and reveal are small inline evaluations.
pub struct TabView {
    tab: Arc<Tab>,
}

impl TabView {
    pub fn new(tab: Arc<Tab>) -> Self {
        Self { tab }
    }

    /// The underlying tab
    pub fn tab(&self) -> &Arc<Tab> {
        &self.tab
    }
}

#[derive(Debug, Deserialize)]
struct ApplyResponse {
    ok: bool,
    #[serde(default)]
    applied: usize,
    #[serde(default)]
    reason: String,
}

impl DocumentView for TabView {
    fn capture(&self) -> Result<PageDocument> {
        let result = self
            .tab
            .evaluate(CAPTURE_PAGE_JS, false)
            .map_err(|e| LensError::TargetUnavailable(format!("capture script failed: {}", e)))?;

        let value = result
            .value
            .ok_or_else(|| LensError::CaptureFailed("capture script returned no value".to_string()))?;
        let json = value
            .as_str()
            .ok_or_else(|| LensError::CaptureFailed("capture script returned a non-string value".to_string()))?;

        PageDocument::from_json(json)
    }

    fn apply_marks(&mut self, plan: &MarkPlan) -> Result<()> {
        let plan_json = serde_json::to_string(plan)
            .map_err(|e| LensError::TabOperationFailed(format!("Failed to encode mark plan: {}", e)))?;
        let call = format!("{}({})", APPLY_MARKS_JS, plan_json);

        let result = self
            .tab
            .evaluate(&call, false)
            .map_err(|e| LensError::TargetUnavailable(format!("apply script failed: {}", e)))?;

        let value = result
            .value
            .ok_or_else(|| LensError::CaptureFailed("apply script returned no value".to_string()))?;
        let json = value
            .as_str()
            .ok_or_else(|| LensError::CaptureFailed("apply script returned a non-string value".to_string()))?;
        let response: ApplyResponse = serde_json::from_str(json)
            .map_err(|e| LensError::CaptureFailed(format!("invalid apply response: {}", e)))?;

        if !response.ok {
            return Err(LensError::TargetUnavailable(response.reason));
        }

        log::debug!("applied {} marks", response.applied);
        Ok(())
    }

    fn clear_marks(&mut self) -> Result<usize> {
        let clear_js = format!(
            r#"(function() {{
                const marks = Array.from(document.querySelectorAll('span.{}'));
                for (const mark of marks) {{
                    const parent = mark.parentNode;
                    if (!parent) continue;
                    parent.replaceChild(document.createTextNode(mark.textContent), mark);
                    parent.normalize();
                }}
                return marks.length;
            }})()"#,
            MARK_CLASS
        );

        let result = self
            .tab
            .evaluate(&clear_js, false)
            .map_err(|e| LensError::TargetUnavailable(format!("clear script failed: {}", e)))?;

        let count = result
            .value
            .and_then(|v| v.as_u64())
            .ok_or_else(|| LensError::CaptureFailed("clear script returned no count".to_string()))?;

        Ok(count as usize)
    }

    fn reveal_first_mark(&mut self) -> Result<()> {
        let reveal_js = format!(
            r#"(function() {{
                const mark = document.querySelector('span.{}');
                if (mark) {{
                    mark.scrollIntoView({{ behavior: 'smooth', block: 'center' }});
                }}
                return true;
            }})()"#,
            MARK_CLASS
        );

        self.tab
            .evaluate(&reveal_js, false)
            .map_err(|e| LensError::TargetUnavailable(format!("reveal script failed: {}", e)))?;

        Ok(())
    }
}

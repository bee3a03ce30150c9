use std::fs;
use std::path::PathBuf;
use std::sync::Arc;

use tempfile::TempDir;
use vhost_app::{
    existing_applications, AppContext, Application, DirtyTracker, RecordingScripts, ScriptCall,
};
use vhost_config::{RailsEnv, VhostFile};

struct LifecycleFixture {
    _temp_dir: TempDir,
    apps_dir: PathBuf,
    project_dir: PathBuf,
    scripts: Arc<RecordingScripts>,
    tracker: Arc<DirtyTracker>,
    context: Arc<AppContext>,
}

impl LifecycleFixture {
    fn new() -> Self {
        let temp_dir = TempDir::new().unwrap();
        let apps_dir = temp_dir.path().join("passenger_pane_vhosts");
        let project_dir = temp_dir.path().join("Sites/Online_Store");
        fs::create_dir_all(&apps_dir).unwrap();
        fs::create_dir_all(&project_dir).unwrap();

        let scripts = Arc::new(RecordingScripts::new());
        let tracker = Arc::new(DirtyTracker::new());
        let context = Arc::new(
            AppContext::new(&apps_dir, scripts.clone()).with_listener(tracker.clone()),
        );

        Self {
            _temp_dir: temp_dir,
            apps_dir,
            project_dir,
            scripts,
            tracker,
            context,
        }
    }

    fn project(&self) -> String {
        self.project_dir.display().to_string()
    }

    /// Play the installer: write the vhost file for every record in the last install call.
    fn materialize_last_install(&self) {
        let calls = self.scripts.calls();
        let install = calls
            .iter()
            .rev()
            .find(|c| matches!(c, ScriptCall::Install(_)))
            .expect("an install call");
        for record in install.records().unwrap() {
            let file = VhostFile {
                vhostname: Some(record.vhostname),
                host: Some(record.host),
                path: Some(record.path),
                environment: Some(record.environment),
                allow_mod_rewrite: Some(record.allow_mod_rewrite),
                user_defined_data: record.user_defined_data,
            };
            fs::write(&record.config_path, file.render()).unwrap();
        }
    }
}

#[test]
fn test_new_application_install_then_reload_from_disk() {
    let fixture = LifecycleFixture::new();

    let mut app = Application::for_path(fixture.context.clone(), &fixture.project());
    assert_eq!(app.host(), "online-store.local");
    assert_eq!(fixture.tracker.dirty_paths(), vec![fixture.project()]);

    assert!(app.apply().unwrap());
    fixture.materialize_last_install();

    let apps = existing_applications(&fixture.context).unwrap();
    assert_eq!(apps.len(), 1);
    let loaded = &apps[0];
    assert_eq!(loaded.host(), "online-store.local");
    assert_eq!(loaded.path(), fixture.project());
    assert_eq!(loaded.environment(), RailsEnv::Development);
    assert!(!loaded.allow_mod_rewrite());
    assert_eq!(loaded.vhostname(), "*:80");
    assert!(loaded.user_defined_data().contains("Order allow,deny"));
}

#[test]
fn test_edit_revert_then_rename_and_apply() {
    let fixture = LifecycleFixture::new();
    let mut app = Application::for_path(fixture.context.clone(), &fixture.project());
    app.apply().unwrap();
    fixture.materialize_last_install();

    let mut app = Application::from_file(
        fixture.context.clone(),
        &fixture.apps_dir.join("online-store.local.vhost.conf"),
    )
    .unwrap();

    // an edit that is reverted leaves nothing to apply
    app.set_allow_mod_rewrite(true);
    assert!(app.is_revertable());
    app.revert();
    assert!(!app.allow_mod_rewrite());
    assert!(!app.apply().unwrap());

    let calls_before = fixture.scripts.calls().len();
    app.set_host("store.local");
    assert!(app.apply().unwrap());

    let calls = fixture.scripts.calls();
    let new_calls = &calls[calls_before..];
    assert_eq!(new_calls.len(), 2);
    assert!(matches!(new_calls[0], ScriptCall::Uninstall(_)));
    assert_eq!(new_calls[0].records().unwrap()[0].host, "online-store.local");
    assert!(matches!(new_calls[1], ScriptCall::Install(_)));
    assert_eq!(new_calls[1].records().unwrap()[0].host, "store.local");

    assert!(fixture.project_dir.join("tmp/restart.txt").is_file());
    assert!(!app.is_dirty());
}

#[test]
fn test_hand_edited_file_with_reordered_directives() {
    let fixture = LifecycleFixture::new();
    let file = fixture.apps_dir.join("legacy.local.vhost.conf");
    fs::write(
        &file,
        format!(
            "<VirtualHost 127.0.0.1:8080>\n  RailsEnv production\n  # keep me\n  ServerName legacy.local\n  RailsAllowModRewrite on\n  DocumentRoot \"{}/public\"\n</VirtualHost>\n",
            fixture.project()
        ),
    )
    .unwrap();

    let app = Application::from_file(fixture.context.clone(), &file).unwrap();
    assert_eq!(app.host(), "legacy.local");
    assert_eq!(app.path(), fixture.project());
    assert_eq!(app.environment(), RailsEnv::Production);
    assert!(app.allow_mod_rewrite());
    assert_eq!(app.vhostname(), "127.0.0.1:8080");
    assert_eq!(app.user_defined_data(), "  # keep me");

    let data = app.to_data();
    assert_eq!(data.host, app.host());
    assert_eq!(data.path, app.path());
    assert_eq!(data.environment, app.environment());
    assert_eq!(data.allow_mod_rewrite, app.allow_mod_rewrite());
    assert_eq!(data.vhostname, app.vhostname());
}

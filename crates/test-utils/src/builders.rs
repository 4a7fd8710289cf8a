#![allow(dead_code)]

use std::path::PathBuf;

use travis_to_heroku::config::Settings;
use travis_to_heroku::engine::Project;
use travis_to_heroku::fs::mock::MockFileSystem;

pub const TRAVIS_FIXTURE: &str = "\
language: node_js
node_js: node
addons:
  firefox: '51.0'
before_install:
  - 'export DISPLAY=:99.0'
  - 'sh -e /etc/init.d/xvfb start'
";

pub const TRAVIS_DEPLOY_FIXTURE: &str = "\
language: node_js
node_js: node
deploy:
  provider: heroku
  app: my-awesome-app
";

pub const TRAVIS_BEFORE_DEPLOY_FIXTURE: &str = "\
language: node_js
node_js: node
before_deploy:
  - echo 'ready?'
";

pub const PROCFILE_FIXTURE: &str = "web: node index.js\n";

/// Project root used by every mock-filesystem test.
pub fn root() -> PathBuf {
    PathBuf::from("/project")
}

/// Builder for a project laid out on a `MockFileSystem`.
pub struct ProjectBuilder {
    fs: MockFileSystem,
    settings: Settings,
}

impl ProjectBuilder {
    pub fn new() -> Self {
        Self {
            fs: MockFileSystem::new(),
            settings: Settings::default(),
        }
    }

    pub fn with_file(self, name: &str, content: &str) -> Self {
        self.fs.add_file(root().join(name), content);
        self
    }

    pub fn with_travis(self, content: &str) -> Self {
        self.with_file(".travis.yml", content)
    }

    pub fn with_procfile(self) -> Self {
        self.with_file("Procfile", PROCFILE_FIXTURE)
    }

    /// `.yo-rc.json` remembering `name` under the default namespace.
    pub fn with_remembered_app(self, name: &str) -> Self {
        let json = format!(r#"{{ "donejs-heroku": {{ "herokuAppName": "{name}" }} }}"#);
        self.with_file(".yo-rc.json", &json)
    }

    /// `package.json` whose `repository` is the given JSON value.
    pub fn with_repository(self, repository_json: &str) -> Self {
        let json = format!(r#"{{ "name": "place-my-order", "repository": {repository_json} }}"#);
        self.with_file("package.json", &json)
    }

    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    pub fn build(self) -> (Project, MockFileSystem) {
        (Project::new(root(), self.settings), self.fs)
    }
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}

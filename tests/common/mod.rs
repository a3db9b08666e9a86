use std::fs;
use std::process::{Command, Output};
use tempfile::TempDir;

/// Helper struct to run shopdesk commands in an isolated temp directory
pub struct ShopdeskTest {
    pub temp_dir: TempDir,
    binary_path: String,
}

impl ShopdeskTest {
    pub fn new() -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");

        // Find the binary - check both debug and release
        let binary_path = if cfg!(debug_assertions) {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/shopdesk")
        } else {
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/release/shopdesk")
        };

        // If the above doesn't exist, try the alternative
        let binary_path = if std::path::Path::new(binary_path).exists() {
            binary_path.to_string()
        } else {
            // Fallback to debug
            concat!(env!("CARGO_MANIFEST_DIR"), "/target/debug/shopdesk").to_string()
        };

        ShopdeskTest {
            temp_dir,
            binary_path,
        }
    }

    pub fn run(&self, args: &[&str]) -> Output {
        Command::new(&self.binary_path)
            .args(args)
            .current_dir(self.temp_dir.path())
            .output()
            .expect("Failed to execute shopdesk command")
    }

    pub fn run_success(&self, args: &[&str]) -> String {
        let output = self.run(args);
        if !output.status.success() {
            panic!(
                "Command {:?} failed with status {:?}\nstdout: {}\nstderr: {}",
                args,
                output.status,
                String::from_utf8_lossy(&output.stdout),
                String::from_utf8_lossy(&output.stderr)
            );
        }
        String::from_utf8_lossy(&output.stdout).to_string()
    }

    pub fn run_failure(&self, args: &[&str]) -> String {
        let output = self.run(args);
        assert!(
            !output.status.success(),
            "Expected command {:?} to fail, but it succeeded",
            args
        );
        String::from_utf8_lossy(&output.stderr).to_string()
    }

    pub fn write_customer(&self, id: u32, content: &str) {
        let dir = self.temp_dir.path().join(".shopdesk").join("customers");
        fs::create_dir_all(&dir).expect("Failed to create .shopdesk/customers directory");
        let path = dir.join(format!("{}.md", id));
        fs::write(path, content).expect("Failed to write customer record");
    }

    pub fn write_ticket(&self, id: u32, content: &str) {
        let dir = self.temp_dir.path().join(".shopdesk").join("tickets");
        fs::create_dir_all(&dir).expect("Failed to create .shopdesk/tickets directory");
        let path = dir.join(format!("{}.md", id));
        fs::write(path, content).expect("Failed to write ticket record");
    }

    pub fn write_config(&self, content: &str) {
        let dir = self.temp_dir.path().join(".shopdesk");
        fs::create_dir_all(&dir).expect("Failed to create .shopdesk directory");
        let path = dir.join("config.yaml");
        fs::write(path, content).expect("Failed to write config file");
    }

    pub fn read_customer(&self, id: u32) -> String {
        let path = self
            .temp_dir
            .path()
            .join(".shopdesk")
            .join("customers")
            .join(format!("{}.md", id));
        fs::read_to_string(path).expect("Failed to read customer record")
    }

    pub fn read_ticket(&self, id: u32) -> String {
        let path = self
            .temp_dir
            .path()
            .join(".shopdesk")
            .join("tickets")
            .join(format!("{}.md", id));
        fs::read_to_string(path).expect("Failed to read ticket record")
    }

    pub fn ticket_exists(&self, id: u32) -> bool {
        self.temp_dir
            .path()
            .join(".shopdesk")
            .join("tickets")
            .join(format!("{}.md", id))
            .exists()
    }

    pub fn customer_exists(&self, id: u32) -> bool {
        self.temp_dir
            .path()
            .join(".shopdesk")
            .join("customers")
            .join(format!("{}.md", id))
            .exists()
    }

    /// Sign in without going through the login command.
    pub fn sign_in(&self, email: &str, manager: bool) {
        self.write_config(&format!(
            "shop_name: Dan's Computer Repair Shop\nuser:\n  email: {}\n  manager: {}\npoll_interval: 30\n",
            email, manager
        ));
    }
}

/// A minimal valid customer record.
pub fn customer_record(id: u32, first: &str, last: &str, email: &str, active: bool) -> String {
    format!(
        "---\n\
         id: {id}\n\
         first-name: {first}\n\
         last-name: {last}\n\
         email: {email}\n\
         phone: 555-000-{id:04}\n\
         address1: {id} Maplewood Avenue\n\
         city: Springfield\n\
         state: IL\n\
         zip: 62701\n\
         active: {active}\n\
         created: 2024-01-0{day}T09:00:00Z\n\
         updated: 2024-01-0{day}T09:00:00Z\n\
         ---\n",
        day = (id % 8) + 1,
    )
}

/// A minimal valid ticket record. `created_day` orders the default listing.
pub fn ticket_record(
    id: u32,
    customer: u32,
    title: &str,
    tech: &str,
    completed: bool,
    created_day: u32,
) -> String {
    format!(
        "---\n\
         id: {id}\n\
         customer: {customer}\n\
         completed: {completed}\n\
         tech: {tech}\n\
         created: 2024-02-{created_day:02}T08:00:00Z\n\
         updated: 2024-02-{created_day:02}T08:00:00Z\n\
         ---\n\
         # {title}\n\
         \n\
         Dropped off at the counter.\n"
    )
}

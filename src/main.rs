//! Terminal dashboard for the clinic schedule.
//!
//! Pick a role, a doctor, a date and a view mode, then print the day or week
//! grid for that doctor.

use chrono::{Local, NaiveDate, TimeZone, Utc};
use medimate::config::Config;
use medimate::dataset::Dataset;
use medimate::layout::{scheduled_summary, DayLayout, WeekLayout};
use medimate::mock::sample_directory;
use medimate::time::local_date;
use medimate::{AppointmentType, Directory, ScheduleError, ScheduleResult, ScheduleService, ScheduleView, UserRole, ViewMode};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fmt::Display;
use std::io::{self, Write};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

const CELL_WIDTH: usize = 14;

struct DashboardCli<Tz: TimeZone> {
    service: ScheduleService<Tz>,
    doctor_id: String,
    date: NaiveDate,
    view_mode: ViewMode,
    role: UserRole,
    running: bool,
}

impl<Tz> DashboardCli<Tz>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    fn new(service: ScheduleService<Tz>, doctor_id: String) -> Self {
        let date = local_date(&Utc::now(), service.timezone());
        DashboardCli {
            service,
            doctor_id,
            date,
            view_mode: ViewMode::Day,
            role: UserRole::FrontDesk,
            running: true,
        }
    }

    fn today(&self) -> NaiveDate {
        local_date(&Utc::now(), self.service.timezone())
    }

    fn print_header(&self) {
        println!("\n{}", "=".repeat(60));
        println!("       MYMEDIMATE - DOCTOR APPOINTMENTS");
        println!("{}", "=".repeat(60));
    }

    fn print_menu(&self) {
        let doctor = self
            .service
            .directory
            .doctor(&self.doctor_id)
            .map(|d| d.name.as_str())
            .unwrap_or("Unknown doctor");

        println!("\n--- Main Menu ---");
        println!("  [{} | {} | {} | {}]", self.role.name(), doctor, self.date, self.view_mode.name());
        println!("1. Switch role");
        println!("2. Select doctor");
        println!("3. Pick date");
        println!("4. Toggle day/week view");
        println!("5. Show schedule");
        println!("6. List doctors");
        println!("7. Jump to today");
        println!("8. Exit");
        println!("{}", "-".repeat(20));
    }

    fn get_input(&self, prompt: &str, default: Option<&str>) -> io::Result<String> {
        if let Some(def) = default {
            print!("{} [{}]: ", prompt, def);
        } else {
            print!("{}: ", prompt);
        }
        io::stdout().flush()?;

        let mut input = String::new();
        if io::stdin().read_line(&mut input)? == 0 {
            return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "input closed"));
        }
        let input = input.trim();

        if input.is_empty() {
            Ok(default.unwrap_or("").to_string())
        } else {
            Ok(input.to_string())
        }
    }

    fn get_int_input(&self, prompt: &str, default: Option<usize>) -> io::Result<usize> {
        loop {
            let default_str = default.map(|d| d.to_string());
            let input = self.get_input(prompt, default_str.as_deref())?;

            if let Ok(value) = input.parse::<usize>() {
                return Ok(value);
            }
            println!("Please enter a valid number");
        }
    }

    fn switch_role(&mut self) -> io::Result<()> {
        println!("\n--- Switch Role ---");
        println!("  1. {}", UserRole::FrontDesk.name());
        println!("  2. {}", UserRole::Doctor.name());

        let current = if self.role == UserRole::FrontDesk { 1 } else { 2 };
        self.role = match self.get_int_input("Select role", Some(current))? {
            2 => UserRole::Doctor,
            _ => UserRole::FrontDesk,
        };

        println!("\nRole: {}", self.role.name());
        println!("{}", self.role.description());
        Ok(())
    }

    fn select_doctor(&mut self) -> io::Result<()> {
        if !self.role.can_select_doctor() {
            println!("\nDoctor role is limited to viewing only their own schedule.");
            return Ok(());
        }

        let doctors: Vec<(String, String)> = self
            .service
            .directory
            .doctors()
            .iter()
            .map(|d| (d.id.clone(), format!("{} ({})", d.name, d.specialty)))
            .collect();
        if doctors.is_empty() {
            println!("\nNo doctors on file");
            return Ok(());
        }

        println!("\n--- Select Doctor ---");
        for (i, (_, label)) in doctors.iter().enumerate() {
            println!("  {}. {}", i + 1, label);
        }

        let choice = self.get_int_input("Select doctor (0 to go back)", Some(0))?;
        if choice == 0 {
            return Ok(());
        }

        match doctors.get(choice - 1) {
            Some((id, label)) => {
                self.doctor_id = id.clone();
                println!("\nSelected {}", label);
                println!("Working hours: {}", self.service.working_hours_for(id));
            }
            None => println!("Invalid choice"),
        }
        Ok(())
    }

    fn pick_date(&mut self) -> io::Result<()> {
        let current = self.date.format("%Y-%m-%d").to_string();
        let input = self.get_input("Date (YYYY-MM-DD)", Some(&current))?;

        match NaiveDate::parse_from_str(&input, "%Y-%m-%d") {
            Ok(date) => {
                self.date = date;
                println!("\nDate set to {}", date.format("%A, %B %-d, %Y"));
            }
            Err(_) => println!("Please enter a valid date"),
        }
        Ok(())
    }

    fn print_doctor(&self, view: &ScheduleView) {
        match &view.doctor {
            Some(doctor) => {
                println!("\n{}", doctor.name);
                println!("{}", doctor.specialty);
            }
            None => println!("\nUnknown doctor '{}', showing default hours {}", self.doctor_id, view.working_hours),
        }
    }

    fn show_schedule(&self) -> ScheduleResult<()> {
        let view = self.service.query(&self.doctor_id, self.date)?;
        self.print_doctor(&view);

        match self.view_mode {
            ViewMode::Day => {
                let layout = self.service.day_layout(&view, Some(Utc::now()));
                self.print_day(&view, &layout);
            }
            ViewMode::Week => {
                let layout = self.service.week_layout(&view, Some(Utc::now()))?;
                self.print_week(&view, &layout);
            }
        }
        Ok(())
    }

    fn print_day(&self, view: &ScheduleView, layout: &DayLayout) {
        println!("\n--- {} ---", view.date.format("%A, %B %-d, %Y"));
        println!("{}", scheduled_summary(view.day_appointments.len()));

        if view.day_appointments.is_empty() {
            println!("\nNo appointments scheduled for this day.");
            return;
        }

        println!();
        for row in &layout.rows {
            let marker = if row.now_marker.is_some() { ">" } else { " " };
            if row.appointments.is_empty() {
                println!("{}{:>9} |", marker, row.slot.label);
                continue;
            }
            for (i, appointment) in row.appointments.iter().enumerate() {
                let label = if i == 0 { row.slot.label.as_str() } else { "" };
                println!("{}{:>9} | {}", marker, label, self.service.card(appointment));
            }
        }
    }

    fn print_week(&self, view: &ScheduleView, layout: &WeekLayout) {
        println!("\n--- Week of {} ---", view.week_start.format("%B %-d, %Y"));
        println!("{}", scheduled_summary(view.week_appointments.len()));
        let legend: Vec<&str> = AppointmentType::ALL.iter().map(|t| t.label()).collect();
        println!("Legend: {}", legend.join(" / "));

        if view.week_appointments.is_empty() {
            println!("\nNo appointments scheduled for this week.");
            return;
        }

        print!("\n{:>10} |", "Time");
        for day in &layout.days {
            print!(" {:<width$}", day.format("%a %b %-d").to_string(), width = CELL_WIDTH);
        }
        println!();

        for row in &layout.rows {
            print!("{:>10} |", row.label);
            for cell in &row.cells {
                let mut text = match cell.appointments.first() {
                    Some(appointment) => {
                        let name = self.service.directory.patient_name(&appointment.patient_id);
                        let mut text: String = name.chars().take(CELL_WIDTH - 3).collect();
                        if cell.appointments.len() > 1 {
                            text.push_str(&format!("+{}", cell.appointments.len() - 1));
                        }
                        text
                    }
                    None => String::new(),
                };
                if cell.now_marker.is_some() {
                    text.insert(0, '>');
                }
                print!(" {:<width$}", text, width = CELL_WIDTH);
            }
            println!();
        }
    }

    fn list_doctors(&self) {
        println!("\n--- Doctors ---");
        for doctor in self.service.directory.doctors() {
            let current = if doctor.id == self.doctor_id { "*" } else { " " };
            println!(
                "{} {:<4} {:<24} {:<14} {}",
                current, doctor.id, doctor.name, doctor.specialty, doctor.working_hours
            );
        }
    }

    fn handle(&mut self, choice: usize) -> ScheduleResult<()> {
        match choice {
            1 => self.switch_role()?,
            2 => self.select_doctor()?,
            3 => self.pick_date()?,
            4 => {
                self.view_mode = self.view_mode.toggle();
                println!("\nSwitched to {}", self.view_mode.name());
            }
            5 => self.show_schedule()?,
            6 => self.list_doctors(),
            7 => {
                self.date = self.today();
                println!("\nDate set to {}", self.date);
            }
            8 => {
                self.running = false;
                println!("\nGoodbye!");
            }
            _ => println!("Invalid choice"),
        }
        Ok(())
    }

    fn run(&mut self) -> ScheduleResult<()> {
        self.print_header();

        while self.running {
            self.print_menu();

            let choice = match self.get_int_input("Enter choice", Some(5)) {
                Ok(choice) => choice,
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(e) => return Err(e.into()),
            };

            match self.handle(choice) {
                Ok(()) => {}
                Err(ScheduleError::Io(e)) if e.kind() == io::ErrorKind::UnexpectedEof => break,
                Err(ScheduleError::Io(e)) => return Err(e.into()),
                Err(e) => {
                    error!("{}", e);
                    println!("\nError: {}", e);
                }
            }
        }
        Ok(())
    }
}

/// Initialize logging with environment-based configuration
fn init_logging() -> ScheduleResult<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(io::stderr)
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|e| ScheduleError::Config(format!("Failed to set up logging: {}", e)))
}

/// Dataset file when configured, generated mock data otherwise
fn load_directory<Tz: TimeZone>(config: &Config, tz: &Tz) -> ScheduleResult<Directory> {
    if let Some(path) = &config.data_file {
        return Dataset::load(path)?.into_directory();
    }

    let mut rng = match config.mock_seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    sample_directory(&mut rng, tz, local_date(&Utc::now(), tz), config.mock_days)
}

fn start<Tz>(config: Config, tz: Tz) -> ScheduleResult<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    let directory = load_directory(&config, &tz)?;
    info!("Loaded {}", directory);

    let service = ScheduleService::new(directory, tz, config.slot_settings());
    DashboardCli::new(service, config.default_doctor).run()
}

fn run() -> ScheduleResult<()> {
    init_logging()?;

    let config = Config::load()?;
    match config.timezone()? {
        Some(tz) => {
            info!("Using time zone {}", tz);
            start(config, tz)
        }
        None => start(config, Local),
    }
}

fn main() {
    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

// libs/doctor-cell/src/directory.rs
use tracing::debug;
use uuid::Uuid;

use crate::models::{validate_doctor, DayOfWeek, Doctor, DoctorSearchFilters};

/// Static, pre-populated doctor listing. There is no create/update API;
/// the fixtures below are the whole directory.
#[derive(Debug, Clone)]
pub struct DoctorDirectory {
    doctors: Vec<Doctor>,
}

impl DoctorDirectory {
    pub fn seeded() -> Self {
        let directory = Self { doctors: seed_doctors() };
        for doctor in &directory.doctors {
            // Seed data is code; a bad record is a programming error.
            validate_doctor(doctor).expect("seed doctor record is valid");
        }
        directory
    }

    pub fn with_doctors(doctors: Vec<Doctor>) -> Self {
        Self { doctors }
    }

    pub fn all(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn get(&self, id: Uuid) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id == id)
    }

    pub fn find_by_name(&self, name: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.full_name == name)
    }

    /// Filter by specialty/city/free-text name, sorted by rating descending.
    pub fn search(&self, filters: &DoctorSearchFilters) -> Vec<Doctor> {
        let mut results: Vec<Doctor> = self
            .doctors
            .iter()
            .filter(|d| {
                filters
                    .specialty
                    .as_ref()
                    .map_or(true, |s| d.specialty.eq_ignore_ascii_case(s))
            })
            .filter(|d| {
                filters
                    .city
                    .as_ref()
                    .map_or(true, |c| d.city.eq_ignore_ascii_case(c))
            })
            .filter(|d| {
                filters.q.as_ref().map_or(true, |q| {
                    d.full_name.to_lowercase().contains(&q.to_lowercase())
                })
            })
            .cloned()
            .collect();

        results.sort_by(|a, b| b.rating.partial_cmp(&a.rating).unwrap_or(std::cmp::Ordering::Equal));

        debug!("Directory search returned {} doctors", results.len());
        results
    }
}

fn seed_doctors() -> Vec<Doctor> {
    use DayOfWeek::*;

    vec![
        Doctor {
            id: Uuid::from_u128(1),
            full_name: "Dr. Sophie Martin".to_string(),
            specialty: "Cardiologie".to_string(),
            city: "Paris".to_string(),
            address: "12 Rue de la Paix, 75002 Paris".to_string(),
            phone: "+33 1 42 60 30 30".to_string(),
            rating: 4.8,
            available_days: vec![Lundi, Mardi, Jeudi],
            time_slots: vec![
                "09:00".into(), "09:30".into(), "10:00".into(), "10:30".into(),
                "14:00".into(), "14:30".into(), "15:00".into(),
            ],
            consultation_price: 60.0,
        },
        Doctor {
            id: Uuid::from_u128(2),
            full_name: "Dr. Antoine Dubois".to_string(),
            specialty: "Dermatologie".to_string(),
            city: "Lyon".to_string(),
            address: "8 Place Bellecour, 69002 Lyon".to_string(),
            phone: "+33 4 72 40 10 10".to_string(),
            rating: 4.5,
            available_days: vec![Lundi, Mercredi, Vendredi],
            time_slots: vec![
                "08:30".into(), "09:00".into(), "09:30".into(),
                "11:00".into(), "11:30".into(), "16:00".into(),
            ],
            consultation_price: 50.0,
        },
        Doctor {
            id: Uuid::from_u128(3),
            full_name: "Dr. Claire Moreau".to_string(),
            specialty: "Médecine générale".to_string(),
            city: "Paris".to_string(),
            address: "45 Boulevard Saint-Germain, 75005 Paris".to_string(),
            phone: "+33 1 43 25 70 70".to_string(),
            rating: 4.9,
            available_days: vec![Lundi, Mardi, Mercredi, Jeudi, Vendredi],
            time_slots: vec![
                "08:00".into(), "08:30".into(), "09:00".into(), "09:30".into(),
                "10:00".into(), "15:00".into(), "15:30".into(), "16:00".into(),
            ],
            consultation_price: 30.0,
        },
        Doctor {
            id: Uuid::from_u128(4),
            full_name: "Dr. Karim Benali".to_string(),
            specialty: "Pédiatrie".to_string(),
            city: "Marseille".to_string(),
            address: "3 Quai du Port, 13002 Marseille".to_string(),
            phone: "+33 4 91 55 20 20".to_string(),
            rating: 4.7,
            available_days: vec![Mardi, Jeudi, Samedi],
            time_slots: vec![
                "09:00".into(), "10:00".into(), "11:00".into(),
                "14:00".into(), "15:00".into(),
            ],
            consultation_price: 40.0,
        },
        Doctor {
            id: Uuid::from_u128(5),
            full_name: "Dr. Hélène Rousseau".to_string(),
            specialty: "Ophtalmologie".to_string(),
            city: "Lyon".to_string(),
            address: "22 Rue de la République, 69001 Lyon".to_string(),
            phone: "+33 4 78 28 50 50".to_string(),
            rating: 4.3,
            available_days: vec![Mercredi, Jeudi, Vendredi],
            time_slots: vec![
                "10:00".into(), "10:30".into(), "11:00".into(),
                "14:30".into(), "15:00".into(), "15:30".into(),
            ],
            consultation_price: 70.0,
        },
    ]
}

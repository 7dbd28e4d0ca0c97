//! Static configuration of the ten administrable record types.
//!
//! One table drives everything the console does for a type: the collection
//! endpoint it lists from, the columns it shows and the fields it edits.

use serde::Serialize;

/// How a form input is presented and typed in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    Text,
    Number,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Column {
    pub key: &'static str,
    pub label: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Field {
    pub key: &'static str,
    pub label: &'static str,
    pub kind: InputKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RecordTypeConfig {
    pub type_name: &'static str,
    /// Segment of the collection endpoint, `/api/{collection}`
    pub collection: &'static str,
    pub columns: &'static [Column],
    pub fields: &'static [Field],
}

impl RecordTypeConfig {
    pub fn collection_path(&self) -> String {
        format!("/api/{}", self.collection)
    }

    pub fn submit_path(&self) -> String {
        format!("/api/records/{}", self.type_name)
    }

    /// Identifier field; supplying an existing id turns a create into an update
    pub fn id_key(&self) -> &'static str {
        self.fields.first().map(|f| f.key).unwrap_or_default()
    }
}

const fn col(key: &'static str, label: &'static str) -> Column {
    Column { key, label }
}

const fn text(key: &'static str, label: &'static str) -> Field {
    Field { key, label, kind: InputKind::Text }
}

const fn number(key: &'static str, label: &'static str) -> Field {
    Field { key, label, kind: InputKind::Number }
}

pub static RECORD_TYPES: &[RecordTypeConfig] = &[
    RecordTypeConfig {
        type_name: "Users",
        collection: "users",
        columns: &[col("User_ID", "ID"), col("Email", "Email"), col("User_Type", "Type")],
        fields: &[
            number("User_ID", "ID (existing to update)"),
            text("Email", "Email"),
            text("User_Type", "User Type (patient/doctor/admin)"),
            text("Password", "Password"),
        ],
    },
    RecordTypeConfig {
        type_name: "Administrators",
        collection: "administrators",
        columns: &[
            col("Admin_ID", "ID"),
            col("First_Name", "First Name"),
            col("Last_Name", "Last Name"),
            col("Dept_ID", "Department"),
        ],
        fields: &[
            number("Admin_ID", "ID (update only)"),
            text("First_Name", "First Name"),
            text("Last_Name", "Last Name"),
            number("Dept_ID", "Department ID"),
        ],
    },
    RecordTypeConfig {
        type_name: "Doctors",
        collection: "doctors",
        columns: &[
            col("Doctor_ID", "ID"),
            col("First_Name", "First Name"),
            col("Last_Name", "Last Name"),
            col("Specialization", "Specialization"),
        ],
        fields: &[
            number("Doctor_ID", "ID (update only)"),
            text("First_Name", "First Name"),
            text("Last_Name", "Last Name"),
            text("Specialization", "Specialization"),
        ],
    },
    RecordTypeConfig {
        type_name: "Patients",
        collection: "patients",
        columns: &[col("Patient_ID", "ID"), col("First_Name", "First Name"), col("Last_Name", "Last Name")],
        fields: &[
            number("Patient_ID", "ID (update only)"),
            text("First_Name", "First Name"),
            text("Last_Name", "Last Name"),
            text("Address", "Address"),
            text("Phone", "Phone"),
        ],
    },
    RecordTypeConfig {
        type_name: "Departments",
        collection: "departments",
        columns: &[
            col("Dept_ID", "ID"),
            col("Dept_name", "Name"),
            col("Dept_head", "Head"),
            col("Doctor_ID", "Doctor ID"),
        ],
        fields: &[
            number("Dept_ID", "ID (existing to update)"),
            text("Dept_name", "Name"),
            text("Dept_head", "Head"),
            number("Doctor_ID", "Doctor ID"),
        ],
    },
    RecordTypeConfig {
        type_name: "MedicalRecords",
        collection: "medical_records",
        columns: &[
            col("Record_ID", "ID"),
            col("Patient_ID", "Patient"),
            col("Doctor_ID", "Doctor"),
            col("Symptoms", "Symptoms"),
            col("Diagnosis", "Diagnosis"),
        ],
        fields: &[
            number("Record_ID", "ID (existing to update)"),
            number("Patient_ID", "Patient ID"),
            number("Doctor_ID", "Doctor ID"),
            text("Symptoms", "Symptoms"),
            text("Diagnosis", "Diagnosis"),
        ],
    },
    RecordTypeConfig {
        type_name: "Appointments",
        collection: "appointments",
        columns: &[
            col("Appt_ID", "ID"),
            col("Doctor_ID", "Doctor"),
            col("Patient_ID", "Patient"),
            col("Date", "Date"),
            col("Time", "Time"),
        ],
        fields: &[
            number("Appt_ID", "ID (existing to update)"),
            number("Doctor_ID", "Doctor ID"),
            number("Patient_ID", "Patient ID"),
            text("Date", "Date (YYYY-MM-DD)"),
            text("Time", "Time (HH:MM)"),
        ],
    },
    RecordTypeConfig {
        type_name: "Rooms",
        collection: "rooms",
        columns: &[col("Room_ID", "ID"), col("Appt_ID", "Appointment"), col("room_type", "Type")],
        fields: &[
            number("Room_ID", "ID (existing to update)"),
            number("Appt_ID", "Appointment ID"),
            text("room_type", "Type"),
        ],
    },
    RecordTypeConfig {
        type_name: "Treatments",
        collection: "treatments",
        // the collection endpoint spells the prescription key "Perscription"
        columns: &[col("Treatment_ID", "ID"), col("Medicine", "Medicine"), col("Perscription", "Prescription")],
        fields: &[
            number("Treatment_ID", "ID (existing to update)"),
            number("Record_ID", "Record ID"),
            text("Medicine", "Medicine"),
            text("Prescription", "Prescription"),
        ],
    },
    RecordTypeConfig {
        type_name: "Bills",
        collection: "bills",
        columns: &[
            col("Payment_ID", "ID"),
            col("Patient_ID", "Patient"),
            col("Date", "Date"),
            col("Cost", "Cost"),
            col("Paid", "Paid"),
        ],
        fields: &[
            number("Payment_ID", "ID (existing to update)"),
            number("Patient_ID", "Patient ID"),
            text("Date", "Date (YYYY-MM-DD)"),
            number("Cost", "Cost"),
            text("Paid", "Paid (Yes/No)"),
        ],
    },
];

/// Look up a record type by its exact name
pub fn lookup(type_name: &str) -> Option<&'static RecordTypeConfig> {
    RECORD_TYPES.iter().find(|c| c.type_name == type_name)
}

pub fn type_names() -> impl Iterator<Item = &'static str> {
    RECORD_TYPES.iter().map(|c| c.type_name)
}

//! GCS error code table.
//!
//! Generated from the vendor's published controller error list. Controller
//! codes are positive, interface and DLL codes are negative; the two ranges
//! never overlap. Entries are sorted by code so lookups can binary search.
//!
//! Do not edit entries by hand. Regenerate from the vendor list instead.

/// One row of the GCS error table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorEntry {
    /// Numeric GCS error code as returned by `ERR?`.
    pub code: i32,
    /// Vendor symbol, e.g. `PI_CNTR_STOP`.
    pub symbol: &'static str,
    /// Human-readable description.
    pub description: &'static str,
}

/// No error.
pub const COM_NO_ERROR: i32 = 0;
/// Generic interface error.
pub const COM_ERROR: i32 = -1;
/// Timeout while waiting for the controller.
pub const COM_TIMEOUT: i32 = -7;
/// Controller did not recognise the command.
pub const PI_CNTR_UNKNOWN_COMMAND: i32 = 2;
/// Unallowable move attempted on unreferenced axis, or move while servo off.
pub const PI_CNTR_UNALLOWABLE_MOVE: i32 = 5;
/// Controller was stopped by command (`HLT`, `STP`, `#24`).
pub const PI_CNTR_STOP: i32 = 10;

/// Text reported for codes missing from the table.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// Translate a GCS error code to its description.
///
/// Codes that are not in the table yield [`UNKNOWN_ERROR`] rather than failing.
pub fn translate(code: i32) -> &'static str {
    lookup(code).map_or(UNKNOWN_ERROR, |e| e.description)
}

/// Vendor symbol for a GCS error code, if known.
pub fn symbol(code: i32) -> Option<&'static str> {
    lookup(code).map(|e| e.symbol)
}

/// Find the table row for `code`.
pub fn lookup(code: i32) -> Option<&'static ErrorEntry> {
    ERROR_TABLE
        .binary_search_by_key(&code, |e| e.code)
        .ok()
        .map(|idx| &ERROR_TABLE[idx])
}

macro_rules! entries {
    ($(($code:expr, $symbol:literal, $description:literal)),* $(,)?) => {
        &[$(ErrorEntry { code: $code, symbol: $symbol, description: $description }),*]
    };
}

/// All known GCS error codes, sorted by code.
pub static ERROR_TABLE: &[ErrorEntry] = entries![
    (-1082, "PI_SOFTWARE_TIMEOUT", "Timeout Error. Some lengthy operation did not finish within expected time."),
    (-1081, "PI_USERSTAGES_DAT_FILE_INVALID_REVISION", "User stages DAT file does not have correct revision."),
    (-1080, "PI_PARAM_DAT_FILE_INVALID_REVISION", "Parameter DAT file does not have correct revision."),
    (-1079, "PI_CANNOT_CREATE_PARAM_DAT_FILE", "Cannot create parameter DAT file to store user defined stage type."),
    (-1078, "PI_CANNOT_WRITE_TO_PARAM_DAT_FILE", "Cannot write to parameter DAT file to store user defined stage type."),
    (-1077, "PI_PARAM_DAT_FILE_INVALID_VERSION", "Version of parameter DAT file does not match the required version. Current files are available at www.pi.ws."),
    (-1076, "PI_INTERFACE_LOCKED", "The interface is currently locked by another function. Please try again later."),
    (-1075, "PI_INVALID_LIBRARY_VERSION", "The library used doesn't match the required version. Please see the documentation to determine the required library version."),
    (-1074, "PI_INVALID_DEVICE_DRIVER_VERSION", "The installed device driver doesn't match the required version. Please see the documentation to determine the required device driver version."),
    (-1073, "PI_EXT_PROFILE_UNKNOWN_CLUSTER_IDENTIFIER", "Unknown cluster identifier"),
    (-1072, "PI_EXT_PROFILE_WRONG_CLUSTER", "User Profile Mode: Cluster is not assigned to this axis"),
    (-1071, "PI_EXT_PROFILE_OUT_OF_MEMORY", "User Profile Mode: Out of memory"),
    (-1070, "PI_PROFILE_GENERATOR_PAR_OUT_OF_RANGE", "ProfileGenerator: Parameter out of allowed range"),
    (-1069, "PI_PROFILE_GENERATOR_UNKNOWN_PARAMETER", "ProfileGenerator: Unknown parameter ID in Set/Get Parameter command"),
    (-1068, "PI_PROFILE_GENERATOR_OUT_OF_LIMITS", "ProfileGenerator: Generated profile exceeds limits of one or both axes"),
    (-1067, "PI_PROFILE_GENERATOR_NO_PROFILE", "ProfileGenerator: No profile has been created yet"),
    (-1066, "PI_EXT_PROFILE_INDEX_OUT_OF_RANGE", "User Profile Mode: Block or Data Set index out of allowed range"),
    (-1065, "PI_EXT_PROFILE_ACTIVE", "Controller is (already) in User Profile Mode"),
    (-1064, "PI_EXT_PROFILE_EXPECTING_MOTION_ERROR", "User Profile Mode: First target position in User Profile is too far from current position"),
    (-1063, "PI_EXT_PROFILE_UNALLOWED_CMD", "User Profile Mode: Command is not allowed, check for required preparatory commands"),
    (-1062, "PI_WAVE_EDITOR_MISSING_GRAPH_COMPONENT", "WaveEditor: Graph display component not installed"),
    (-1061, "PI_WAVE_EDITOR_WRONG_ITEM_VALUE", "WaveEditor: Error during wave creation, could not calculate value"),
    (-1060, "PI_WAVE_EDITOR_WRONG_DP_VALUE", "WaveEditor: Error during wave creation, incorrect index for floating point parameter"),
    (-1059, "PI_WAVE_EDITOR_WRONG_IP_VALUE", "WaveEditor: Error during wave creation, incorrect index for integer parameter"),
    (-1058, "PI_WAVE_EDITOR_FREQUENCY_OUT_OF_RANGE", "WaveEditor: Frequency out of range"),
    (-1057, "PI_WAVE_EDITOR_WRONG_PARAMNUM", "WaveEditor: Error during wave creation, incorrect number of parameters"),
    (-1056, "PI_OPM_COM_ERROR", "Error during communication with OPM (Optical Power Meter), maybe no OPM connected"),
    (-1055, "PI_INVALID_PASSWORD", "Invalid password"),
    (-1054, "PI_NO_WAVE_RUNNING", "No wave being output to specified axis"),
    (-1053, "PI_COULDNT_FIND_PISTAGES_DAT", "The PiStages.dat database could not be found. This file is required to connect a stage with the CST command"),
    (-1052, "PI_FILE_TRANSFER_CRC_ERROR", "Checksum error when transfering a file to/from the controller"),
    (-1051, "PI_FILE_TRANSFER_ERROR_TEMP_FILE", "Could not create/read file on host PC"),
    (-1050, "PI_FILE_TRANSFER_BEGIN_MISSING", "A uuencoded file transfered did not start with \"begin\" followed by the proper filename"),
    (-1049, "PI_STAGE_NAME_ISNT_UNIQUE", "A stage name given to CST is not unique"),
    (-1048, "PI_INVALID_SPP_CMD_ID", "Command ID given to SPP or SPP? is not valid"),
    (-1047, "PI_REQUIRED_WAVE_NOT_FOUND", "Could not find parameter set required by frequency relation"),
    (-1046, "PI_REFERENCE_ERROR", "Not all axes could be referenced"),
    (-1045, "PI_CANT_STOP_OR_START_WAV", "Wave output to axis already stopped/started"),
    (-1044, "PI_NO_WAVE_FOR_AXIS_DEFINED", "No wave defined for specified axis"),
    (-1043, "PI_NUMBER_OF_POSSIBLE_GENERATORS_EXCEEDED", "The maximum number of wave generators has been exceeded"),
    (-1042, "PI_NUMBER_OF_POSSIBLE_WAVES_EXCEEDED", "The maximum number of wave definitions has been exceeded"),
    (-1041, "PI_PARAM_SET_ERROR", "Parameter could not be set with SPA--parameter not defined for this controller!"),
    (-1040, "PI_INVALID_CONTROLLER_VERSION", "The version of the connected controller is invalid"),
    (-1039, "PI_PARAMETER_FILE_OPEN_ERROR", "Could not open parameter file"),
    (-1038, "PI_PARAMETER_FILE_ALREADY_OPENED", "There is already a parameter file open. Close it before opening a new file"),
    (-1037, "PI_STAGE_DOES_NOT_EXIST", "Selected stage does not exist"),
    (-1036, "PI_NO_PARAMETER_FILE_OPENED", "There is no parameter file open"),
    (-1035, "PI_PARAMETER_FILE_PROTECTED", "The open parameter file is protected and cannot be edited"),
    (-1034, "PI_DLL_NOT_LOADED", "DLL necessary to call function not loaded, or function not found in DLL"),
    (-1033, "PI_C844_ERROR", "Error from C-844 Controller"),
    (-1032, "PI_USER_CANCELLED", "The user cancelled a dialog"),
    (-1031, "PI_WAVE_EDITOR_FUNC_NOT_LOADED", "The WGWaveEditor DLL function was not found at startup"),
    (-1030, "PI_UNKNOWN_WAVE_SET", "Could not find description of wave form. Maybe WG.INI is missing?"),
    (-1029, "PI_WAVE_PARAM_FILE_ERROR", "Error while reading/writing wave generator parameter file"),
    (-1028, "PI_UNKNOWN_CHANNEL_IDENTIFIER", "Unknown channel identifier"),
    (-1027, "PI_PZT_CONFIG_INVALID_PARAMS", "Current settings are not valid for desired configuration"),
    (-1026, "PI_PZT_CONFIG_FAILED", "Configuration of PZT stage or amplifier failed"),
    (-1025, "PI_RUNNING_MACRO", "Controller is (already) running a macro"),
    (-1024, "PI_MOTION_ERROR", "Motion error: position error too large, servo is switched off automatically"),
    (-1023, "PI_WAV_FAILED", "Generation of wave failed"),
    (-1022, "PI_WAV_SAMPLES_OUT_OF_RANGE", "Incorrect number of samples given to WAV"),
    (-1021, "PI_NR_AVG_OUT_OF_RANGE", "Number for AVG out of range--must be >0"),
    (-1020, "PI_INVALID_SPA_CMD_ID", "Invalid parameter ID given to SPA or SPA?"),
    (-1019, "PI_COM_ARRAY_RANGE_ERROR", "Range of array does not fit the number of parameters"),
    (-1018, "PI_COM_ARRAY_ERROR", "Could not access array data in COM server"),
    (-1017, "PI_INVALID_AXIS_IDENTIFIER", "Invalid axis identifier"),
    (-1016, "PI_AXIS_ALREADY_EXISTS", "Axis identifier is already in use by a connected stage"),
    (-1015, "PI_INVALID_ARGUMENT", "One or more arguments given to function is invalid (empty string, index out of range, ...)"),
    (-1014, "PI_MACRO_EDITOR_ERROR", "Internal error in macro editor"),
    (-1013, "PI_NO_MACRO_OR_EMPTY", "No macro with given name on controller, or macro is empty"),
    (-1012, "PI_MACRO_FILE_ERROR", "Could not open file to write or read macro"),
    (-1011, "PI_NOT_IN_MACRO_MODE", "Controller not in macro mode--command not valid unless macro mode active"),
    (-1010, "PI_IN_MACRO_MODE", "Controller is (already) in macro mode--command not valid in macro mode"),
    (-1009, "PI_THREAD_ERROR", "Internal error--could not start thread"),
    (-1008, "PI_CONTROLLER_BUSY", "Controller is busy with some lengthy operation (e.g. reference move, fast scan algorithm)"),
    (-1007, "PI_INVALID_MANUAL_PAD_AXIS", "Axis not currently controlled by a manual control pad"),
    (-1006, "PI_INVALID_MANUAL_PAD_KNOB", "Invalid number for manual control pad knob"),
    (-1005, "PI_NO_MANUAL_PAD", "No manual control pad installed, calls to SMA and related commands are not allowed"),
    (-1004, "PI_UNEXPECTED_RESPONSE", "Controller sent unexpected response"),
    (-1003, "PI_INVALID_SGA", "Invalid value for SGA--must be one of {1, 10, 100, 1000}"),
    (-1002, "PI_NR_NAV_OUT_OF_RANGE", "Number for NAV out of range--must be in [1,10000]"),
    (-1001, "PI_UNKNOWN_AXIS_IDENTIFIER", "Unknown axis identifier"),
    (-61, "COM_PCI_ACCESS_DENIED", "Driver could not be opened (on Vista: run as administrator!)"),
    (-60, "COM_PCI_INVALID_ID", "No Device with this ID is present"),
    (-59, "COM_SOCKET_INTERRUPTED", "Operation was interrupted by a nonblocked signal"),
    (-58, "COM_SOCKET_NO_RESPONSE", "Can't connect to peer"),
    (-57, "COM_SOCKET_TERMINATED", "Connection terminated (by peer)"),
    (-56, "COM_SOCKET_NOT_CONNECTED", "Socket not connected (or not valid)"),
    (-55, "COM_SOCKET_PORT_IN_USE", "Port is used by another socket"),
    (-54, "COM_SOCKET_NOT_READY", "Socket not ready, you should call the function again"),
    (-53, "COM_PORT_CHECKSUM_ERROR", "Checksum error in received data from COM port"),
    (-52, "COM_PORT_ALREADY_OPEN", "Error while opening the COM port: was already open"),
    (-51, "COM_FTDIUSB_OTHER_ERROR", "FTDIUSB: other error"),
    (-50, "COM_FTDIUSB_NOT_SUPPORTED", "FTDIUSB: not supported"),
    (-49, "COM_FTDIUSB_INVALID_ARGS", "FTDIUSB: invalid arguments"),
    (-48, "COM_FTDIUSB_EEPROM_NOT_PROGRAMMED", "FTDIUSB: EEPROM not programmed"),
    (-47, "COM_FTDIUSB_EEPROM_NOT_PRESENT", "FTDIUSB: EEPROM not present"),
    (-46, "COM_FTDIUSB_EEPROM_ERASE_FAILED", "FTDIUSB: EEPROM erase failed"),
    (-45, "COM_FTDIUSB_EEPROM_WRITE_FAILED", "FTDIUSB: EEPROM write failed"),
    (-44, "COM_FTDIUSB_EEPROM_READ_FAILED", "FTDIUSB: EEPROM read failed"),
    (-43, "COM_FTDIUSB_FAILED_TO_WRITE_DEVICE", "FTDIUSB: failed to write device"),
    (-42, "COM_FTDIUSB_DEVICE_NOT_OPENED_FOR_WRITE", "FTDIUSB: device not opened for write"),
    (-41, "COM_FTDIUSB_DEVICE_NOT_OPENED_FOR_ERASE", "FTDIUSB: device not opened for erase"),
    (-40, "COM_FTDIUSB_INVALID_BAUD_RATE", "FTDIUSB: invalid baud rate"),
    (-39, "COM_FTDIUSB_INVALID_PARAMETER", "FTDIUSB: invalid parameter"),
    (-38, "COM_FTDIUSB_INSUFFICIENT_RESOURCES", "FTDIUSB: insufficient resources"),
    (-37, "COM_FTDIUSB_IO_ERROR", "FTDIUSB: IO error"),
    (-36, "COM_FTDIUSB_DEVICE_NOT_OPENED", "FTDIUSB: device not opened"),
    (-35, "COM_FTDIUSB_DEVICE_NOT_FOUND", "FTDIUSB: device not found"),
    (-34, "COM_FTDIUSB_INVALID_HANDLE", "FTDIUSB: invalid handle"),
    (-33, "COM_DLL_FUNC_ERROR", "A DLL or one of the required functions could not be loaded"),
    (-32, "COM_INTERNAL_RESOURCES_ERROR", "Error dealing with internal system resources (events, threads, ...)"),
    (-31, "COM_ERROR_RS_SETTINGS", "RS-232: Error configuring the COM port"),
    (-30, "COM_RS_INVALID_DATA_BITS", "RS-232: 5 data bits with 2 stop bits is an invalid combination, as is 6, 7, or 8 data bits with 1.5 stop bits"),
    (-29, "COM_GPIB_ELCK", "IEEE488: Address or board locked"),
    (-28, "COM_GPIB_ETAB", "IEEE488: Return buffer full"),
    (-27, "COM_GPIB_ESRQ", "IEEE488: SRQ remains asserted"),
    (-26, "COM_GPIB_ESTB", "IEEE488: Serial poll-status byte lost"),
    (-25, "COM_GPIB_EBUS", "IEEE488: Command error during device call"),
    (-24, "COM_GPIB_EFSO", "IEEE488: File system operation error"),
    (-23, "COM_GPIB_ECAP", "IEEE488: No capability for intended operation"),
    (-22, "COM_GPIB_EOIP", "IEEE488: I/O operation started before previous operation completed"),
    (-21, "COM_GPIB_EDMA", "IEEE488: Error performing DMA"),
    (-20, "COM_GPIB_ENEB", "IEEE488: Interface board not found"),
    (-19, "COM_GPIB_EABO", "IEEE488: I/O operation aborted"),
    (-18, "COM_GPIB_ESAC", "IEEE488: Function requires GPIB board to be SAC"),
    (-17, "COM_GPIB_EARG", "IEEE488: Invalid argument to function call"),
    (-16, "COM_GPIB_EADR", "IEEE488: Interface board not addressed correctly"),
    (-15, "COM_GPIB_ENOL", "IEEE488: Write function detected no listeners"),
    (-14, "COM_GPIB_ECIC", "IEEE488: Function requires GPIB board to be CIC"),
    (-13, "COM_GPIB_EDVR", "IEEE488: System error"),
    (-12, "COM_ECHO_ERROR", "Error while sending \"echoed\" data"),
    (-11, "COM_NOT_IMPLEMENTED", "Function not supported by this interface type"),
    (-10, "COM_NOTIFY_EVENT_ERROR", "Event/message for notification could not be opened"),
    (-9, "COM_INVALID_ID", "There is no interface or DLL handle with the given ID"),
    (-8, "COM_MULTILINE_RESPONSE", "There are more lines waiting in buffer"),
    (-7, "COM_TIMEOUT", "Timeout error"),
    (-6, "CONNECTION_FAILED", "Error while opening port"),
    (-5, "COM_BUFFER_OVERFLOW", "Buffer overflow"),
    (-4, "NOT_CONNECTED_ERROR", "Not connected (no port with given ID open)"),
    (-3, "REC_ERROR", "Error while receiving data"),
    (-2, "SEND_ERROR", "Error while sending data"),
    (-1, "COM_ERROR", "Error during com operation (could not be specified)"),
    (0, "PI_CNTR_NO_ERROR", "No error"),
    (1, "PI_CNTR_PARAM_SYNTAX", "Parameter syntax error"),
    (2, "PI_CNTR_UNKNOWN_COMMAND", "Unknown command"),
    (3, "PI_CNTR_COMMAND_TOO_LONG", "Command length out of limits or command buffer overrun"),
    (4, "PI_CNTR_SCAN_ERROR", "Error while scanning"),
    (5, "PI_CNTR_MOVE_WITHOUT_REF_OR_NO_SERVO", "Unallowable move attempted on unreferenced axis, or move attempted with servo off"),
    (6, "PI_CNTR_INVALID_SGA_PARAM", "Parameter for SGA not valid"),
    (7, "PI_CNTR_POS_OUT_OF_LIMITS", "Position out of limits"),
    (8, "PI_CNTR_VEL_OUT_OF_LIMITS", "Velocity out of limits"),
    (9, "PI_CNTR_SET_PIVOT_NOT_POSSIBLE", "Attempt to set pivot point while U,V and W not all 0"),
    (10, "PI_CNTR_STOP", "Controller was stopped by command"),
    (11, "PI_CNTR_SST_OR_SCAN_RANGE", "Parameter for SST or for one of the embedded scan algorithms out of range"),
    (12, "PI_CNTR_INVALID_SCAN_AXES", "Invalid axis combination for fast scan"),
    (13, "PI_CNTR_INVALID_NAV_PARAM", "Parameter for NAV out of range"),
    (14, "PI_CNTR_INVALID_ANALOG_INPUT", "Invalid analog channel"),
    (15, "PI_CNTR_INVALID_AXIS_IDENTIFIER", "Invalid axis identifier"),
    (16, "PI_CNTR_INVALID_STAGE_NAME", "Invalid stage name"),
    (17, "PI_CNTR_PARAM_OUT_OF_RANGE", "Parameter out of range"),
    (18, "PI_CNTR_INVALID_MACRO_NAME", "Invalid macro name"),
    (19, "PI_CNTR_MACRO_RECORD", "Error while recording macro"),
    (20, "PI_CNTR_MACRO_NOT_FOUND", "Macro not found"),
    (21, "PI_CNTR_AXIS_HAS_NO_BRAKE", "Axis has no brake"),
    (22, "PI_CNTR_DOUBLE_AXIS", "Axis identifier specified more than once"),
    (23, "PI_CNTR_ILLEGAL_AXIS", "Illegal axis"),
    (24, "PI_CNTR_PARAM_NR", "Incorrect number of parameters"),
    (25, "PI_CNTR_INVALID_REAL_NR", "Invalid floating point number"),
    (26, "PI_CNTR_MISSING_PARAM", "Parameter missing"),
    (27, "PI_CNTR_SOFT_LIMIT_OUT_OF_RANGE", "Soft limit out of range"),
    (28, "PI_CNTR_NO_MANUAL_PAD", "No manual pad found"),
    (29, "PI_CNTR_NO_JUMP", "No more step-response values"),
    (30, "PI_CNTR_INVALID_JUMP", "No step-response values recorded"),
    (31, "PI_CNTR_AXIS_HAS_NO_REFERENCE", "Axis has no reference sensor"),
    (32, "PI_CNTR_STAGE_HAS_NO_LIM_SWITCH", "Axis has no limit switch"),
    (33, "PI_CNTR_NO_RELAY_CARD", "No relay card installed"),
    (34, "PI_CNTR_CMD_NOT_ALLOWED_FOR_STAGE", "Command not allowed for selected stage(s)"),
    (35, "PI_CNTR_NO_DIGITAL_INPUT", "No digital input installed"),
    (36, "PI_CNTR_NO_DIGITAL_OUTPUT", "No digital output configured"),
    (37, "PI_CNTR_NO_MCM", "No more MCM responses"),
    (38, "PI_CNTR_INVALID_MCM", "No MCM values recorded"),
    (39, "PI_CNTR_INVALID_CNTR_NUMBER", "Controller number invalid"),
    (40, "PI_CNTR_NO_JOYSTICK_CONNECTED", "No joystick configured"),
    (41, "PI_CNTR_INVALID_EGE_AXIS", "Invalid axis for electronic gearing, axis can not be slave"),
    (42, "PI_CNTR_SLAVE_POSITION_OUT_OF_RANGE", "Position of slave axis is out of range"),
    (43, "PI_CNTR_COMMAND_EGE_SLAVE", "Slave axis cannot be commanded directly when electronic gearing is enabled"),
    (44, "PI_CNTR_JOYSTICK_CALIBRATION_FAILED", "Calibration of joystick failed"),
    (45, "PI_CNTR_REFERENCING_FAILED", "Referencing failed"),
    (46, "PI_CNTR_OPM_MISSING", "OPM (Optical Power Meter) missing"),
    (47, "PI_CNTR_OPM_NOT_INITIALIZED", "OPM (Optical Power Meter) not initialized or cannot be initialized"),
    (48, "PI_CNTR_OPM_COM_ERROR", "OPM (Optical Power Meter) Communication Error"),
    (49, "PI_CNTR_MOVE_TO_LIMIT_SWITCH_FAILED", "Move to limit switch failed"),
    (50, "PI_CNTR_REF_WITH_REF_DISABLED", "Attempt to reference axis with referencing disabled"),
    (51, "PI_CNTR_AXIS_UNDER_JOYSTICK_CONTROL", "Selected axis is controlled by joystick"),
    (52, "PI_CNTR_COMMUNICATION_ERROR", "Controller detected communication error"),
    (53, "PI_CNTR_DYNAMIC_MOVE_IN_PROCESS", "MOV! motion still in progress"),
    (54, "PI_CNTR_UNKNOWN_PARAMETER", "Unknown parameter"),
    (55, "PI_CNTR_NO_REP_RECORDED", "No commands were recorded with REP"),
    (56, "PI_CNTR_INVALID_PASSWORD", "Password invalid"),
    (57, "PI_CNTR_INVALID_RECORDER_CHAN", "Data Record Table does not exist"),
    (58, "PI_CNTR_INVALID_RECORDER_SRC_OPT", "Source does not exist; number too low or too high"),
    (59, "PI_CNTR_INVALID_RECORDER_SRC_CHAN", "Source Record Table number too low or too high"),
    (60, "PI_CNTR_PARAM_PROTECTION", "Protected Param: current Command Level (CCL) too low"),
    (61, "PI_CNTR_AUTOZERO_RUNNING", "Command execution not possible while Autozero is running"),
    (62, "PI_CNTR_NO_LINEAR_AXIS", "Autozero requires at least one linear axis"),
    (63, "PI_CNTR_INIT_RUNNING", "Initialization still in progress"),
    (64, "PI_CNTR_READ_ONLY_PARAMETER", "Parameter is read-only"),
    (65, "PI_CNTR_PAM_NOT_FOUND", "Parameter not found in non-volatile memory"),
    (66, "PI_CNTR_VOL_OUT_OF_LIMITS", "Voltage out of limits"),
    (67, "PI_CNTR_WAVE_TOO_LARGE", "Not enough memory available for requested wave curve"),
    (68, "PI_CNTR_NOT_ENOUGH_DDL_MEMORY", "Not enough memory available for DDL table; DDL can not be started"),
    (69, "PI_CNTR_DDL_TIME_DELAY_TOO_LARGE", "Time delay larger than DDL table; DDL can not be started"),
    (70, "PI_CNTR_DIFFERENT_ARRAY_LENGTH", "The requested arrays have different lengths; query them separately"),
    (71, "PI_CNTR_GEN_SINGLE_MODE_RESTART", "Attempt to restart the generator while it is running in single step mode"),
    (72, "PI_CNTR_ANALOG_TARGET_ACTIVE", "Motion commands and wave generator activation are not allowed when analog target is active"),
    (73, "PI_CNTR_WAVE_GENERATOR_ACTIVE", "Motion commands are not allowed when wave generator output is active; use WGO to disable generator output"),
    (74, "PI_CNTR_AUTOZERO_DISABLED", "No sensor channel or no piezo channel connected to selected axis (sensor and piezo matrix)"),
    (75, "PI_CNTR_NO_WAVE_SELECTED", "Generator started (WGO) without having selected a wave table (WSL)."),
    (76, "PI_CNTR_IF_BUFFER_OVERRUN", "Interface buffer did overrun and command couldn't be received correctly"),
    (77, "PI_CNTR_NOT_ENOUGH_RECORDED_DATA", "Data Record Table does not hold enough recorded data"),
    (78, "PI_CNTR_TABLE_DEACTIVATED", "Data Record Table is not configured for recording"),
    (79, "PI_CNTR_OPENLOOP_VALUE_SET_WHEN_SERVO_ON", "Open-loop commands (SVA, SVR) are not allowed when servo is on"),
    (80, "PI_CNTR_RAM_ERROR", "Hardware error affecting RAM"),
    (81, "PI_CNTR_MACRO_UNKNOWN_COMMAND", "Not macro command"),
    (82, "PI_CNTR_MACRO_PC_ERROR", "Macro counter out of range"),
    (83, "PI_CNTR_JOYSTICK_ACTIVE", "Joystick is active"),
    (84, "PI_CNTR_MOTOR_IS_OFF", "Motor is off"),
    (85, "PI_CNTR_ONLY_IN_MACRO", "Macro-only command"),
    (86, "PI_CNTR_JOYSTICK_UNKNOWN_AXIS", "Invalid joystick axis"),
    (87, "PI_CNTR_JOYSTICK_UNKNOWN_ID", "Joystick unknown"),
    (88, "PI_CNTR_REF_MODE_IS_ON", "Move without referenced stage"),
    (89, "PI_CNTR_NOT_ALLOWED_IN_CURRENT_MOTION_MODE", "Command not allowed in current motion mode"),
    (90, "PI_CNTR_DIO_AND_TRACING_NOT_POSSIBLE", "No tracing possible while digital IOs are used on this HW revision. Reconnect to switch operation mode."),
    (91, "PI_CNTR_COLLISION", "Move not possible, would cause collision"),
    (92, "PI_CNTR_SLAVE_NOT_FAST_ENOUGH", "Stage is not capable of following the master. Check the gear ratio(SRA)."),
    (93, "PI_CNTR_CMD_NOT_ALLOWED_WHILE_AXIS_IN_MOTION", "This command is not allowed while the affected axis or its master is in motion."),
    (94, "PI_CNTR_OPEN_LOOP_JOYSTICK_ENABLED", "Servo cannot be switched on when open-loop joystick control is enabled."),
    (95, "PI_CNTR_INVALID_SERVO_STATE_FOR_PARAMETER", "This parameter cannot be changed in current servo mode."),
    (96, "PI_CNTR_UNKNOWN_STAGE_NAME", "Unknown stage name"),
    (100, "PI_LABVIEW_ERROR", "PI LabVIEW driver reports error. See source control for details."),
    (200, "PI_CNTR_NO_AXIS", "No stage connected to axis"),
    (201, "PI_CNTR_NO_AXIS_PARAM_FILE", "File with axis parameters not found"),
    (202, "PI_CNTR_INVALID_AXIS_PARAM_FILE", "Invalid axis parameter file"),
    (203, "PI_CNTR_NO_AXIS_PARAM_BACKUP", "Backup file with axis parameters not found"),
    (204, "PI_CNTR_RESERVED_204", "PI internal error code 204"),
    (205, "PI_CNTR_SMO_WITH_SERVO_ON", "SMO with servo on"),
    (206, "PI_CNTR_UUDECODE_INCOMPLETE_HEADER", "uudecode: incomplete header"),
    (207, "PI_CNTR_UUDECODE_NOTHING_TO_DECODE", "uudecode: nothing to decode"),
    (208, "PI_CNTR_UUDECODE_ILLEGAL_FORMAT", "uudecode: illegal UUE format"),
    (209, "PI_CNTR_CRC32_ERROR", "CRC32 error"),
    (210, "PI_CNTR_ILLEGAL_FILENAME", "Illegal file name (must be 8-0 format)"),
    (211, "PI_CNTR_FILE_NOT_FOUND", "File not found on controller"),
    (212, "PI_CNTR_FILE_WRITE_ERROR", "Error writing file on controller"),
    (213, "PI_CNTR_DTR_HINDERS_VELOCITY_CHANGE", "VEL command not allowed in DTR Command Mode"),
    (214, "PI_CNTR_POSITION_UNKNOWN", "Position calculations failed"),
    (215, "PI_CNTR_CONN_POSSIBLY_BROKEN", "The connection between controller and stage may be broken"),
    (216, "PI_CNTR_ON_LIMIT_SWITCH", "The connected stage has driven into a limit switch, some controllers need CLR to resume operation"),
    (217, "PI_CNTR_UNEXPECTED_STRUT_STOP", "Strut test command failed because of an unexpected strut stop"),
    (218, "PI_CNTR_POSITION_BASED_ON_ESTIMATION", "While MOV! is running position can only be estimated!"),
    (219, "PI_CNTR_POSITION_BASED_ON_INTERPOLATION", "Position was calculated during MOV motion"),
    (230, "PI_CNTR_INVALID_HANDLE", "Invalid handle"),
    (231, "PI_CNTR_NO_BIOS_FOUND", "No bios found"),
    (232, "PI_CNTR_SAVE_SYS_CFG_FAILED", "Save system configuration failed"),
    (233, "PI_CNTR_LOAD_SYS_CFG_FAILED", "Load system configuration failed"),
    (301, "PI_CNTR_SEND_BUFFER_OVERFLOW", "Send buffer overflow"),
    (302, "PI_CNTR_VOLTAGE_OUT_OF_LIMITS", "Voltage out of limits"),
    (303, "PI_CNTR_OPEN_LOOP_MOTION_SET_WHEN_SERVO_ON", "Open-loop motion attempted when servo ON"),
    (304, "PI_CNTR_RECEIVING_BUFFER_OVERFLOW", "Received command is too long"),
    (305, "PI_CNTR_EEPROM_ERROR", "Error while reading/writing EEPROM"),
    (306, "PI_CNTR_I2C_ERROR", "Error on I2C bus"),
    (307, "PI_CNTR_RECEIVING_TIMEOUT", "Timeout while receiving command"),
    (308, "PI_CNTR_TIMEOUT", "A lengthy operation has not finished in the expected time"),
    (309, "PI_CNTR_MACRO_OUT_OF_SPACE", "Insufficient space to store macro"),
    (310, "PI_CNTR_EUI_OLDVERSION_CFGDATA", "Configuration data has old version number"),
    (311, "PI_CNTR_EUI_INVALID_CFGDATA", "Invalid configuration data"),
    (333, "PI_CNTR_HARDWARE_ERROR", "Internal hardware error"),
    (400, "PI_CNTR_WAV_INDEX_ERROR", "Wave generator index error"),
    (401, "PI_CNTR_WAV_NOT_DEFINED", "Wave table not defined"),
    (402, "PI_CNTR_WAV_TYPE_NOT_SUPPORTED", "Wave type not supported"),
    (403, "PI_CNTR_WAV_LENGTH_EXCEEDS_LIMIT", "Wave length exceeds limit"),
    (404, "PI_CNTR_WAV_PARAMETER_NR", "Wave parameter number error"),
    (405, "PI_CNTR_WAV_PARAMETER_OUT_OF_LIMIT", "Wave parameter out of range"),
    (406, "PI_CNTR_WGO_BIT_NOT_SUPPORTED", "WGO command bit not supported"),
    (500, "PI_CNTR_EMERGENCY_STOP_BUTTON_ACTIVATED", "The \"red knob\" is still set and disables system"),
    (501, "PI_CNTR_EMERGENCY_STOP_BUTTON_WAS_ACTIVATED", "The \"red knob\" was activated and still disables system - reanimation required"),
    (502, "PI_CNTR_REDUNDANCY_LIMIT_EXCEEDED", "Position consistency check failed"),
    (503, "PI_CNTR_COLLISION_SWITCH_ACTIVATED", "Hardware collision sensor(s) are activated"),
    (504, "PI_CNTR_FOLLOWING_ERROR", "Strut following error occurred, e.g. caused by overload or encoder failure"),
    (505, "PI_CNTR_SENSOR_SIGNAL_INVALID", "One sensor signal is not valid"),
    (506, "PI_CNTR_SERVO_LOOP_UNSTABLE", "Servo loop was unstable due to wrong parameter setting and switched off to avoid damage."),
    (555, "PI_CNTR_UNKNOWN_ERROR", "BasMac: unknown controller error"),
    (601, "PI_CNTR_NOT_ENOUGH_MEMORY", "Not enough memory"),
    (602, "PI_CNTR_HW_VOLTAGE_ERROR", "Hardware voltage error"),
    (603, "PI_CNTR_HW_TEMPERATURE_ERROR", "Hardware temperature out of range"),
    (604, "PI_CNTR_POSITION_ERROR_TOO_HIGH", "Position error of any axis in the system is too high"),
    (606, "PI_CNTR_INPUT_OUT_OF_RANGE", "Maximum value of input signal has been exceeded"),
    (1000, "PI_CNTR_TOO_MANY_NESTED_MACROS", "Too many nested macros"),
    (1001, "PI_CNTR_MACRO_ALREADY_DEFINED", "Macro already defined"),
    (1002, "PI_CNTR_NO_MACRO_RECORDING", "Macro recording not activated"),
    (1003, "PI_CNTR_INVALID_MAC_PARAM", "Invalid parameter for MAC"),
    (1004, "PI_CNTR_MACRO_DELETE_ERROR", "Deleting macro failed"),
    (1005, "PI_CNTR_CONTROLLER_BUSY", "Controller is busy with some lengthy operation (e.g. reference move, fast scan algorithm)"),
    (1006, "PI_CNTR_INVALID_IDENTIFIER", "Invalid identifier (invalid special characters, ...)"),
    (1007, "PI_CNTR_UNKNOWN_VARIABLE_OR_ARGUMENT", "Variable or argument not defined"),
    (1008, "PI_CNTR_RUNNING_MACRO", "Controller is (already) running a macro"),
    (1009, "PI_CNTR_MACRO_INVALID_OPERATOR", "Invalid or missing operator for condition. Check necessary spaces around operator."),
    (1010, "PI_CNTR_MACRO_NO_ANSWER", "No answer was received while executing WAC/MEX/JRC/..."),
    (1011, "PI_CMD_NOT_VALID_IN_MACRO_MODE", "Command not valid during macro execution"),
    (1024, "PI_CNTR_MOTION_ERROR", "Motion error: position error too large, servo is switched off automatically"),
    (1063, "PI_CNTR_EXT_PROFILE_UNALLOWED_CMD", "User Profile Mode: Command is not allowed, check for required preparatory commands"),
    (1064, "PI_CNTR_EXT_PROFILE_EXPECTING_MOTION_ERROR", "User Profile Mode: First target position in User Profile is too far from current position"),
    (1065, "PI_CNTR_PROFILE_ACTIVE", "Controller is (already) in User Profile Mode"),
    (1066, "PI_CNTR_PROFILE_INDEX_OUT_OF_RANGE", "User Profile Mode: Block or Data Set index out of allowed range"),
    (1071, "PI_CNTR_PROFILE_OUT_OF_MEMORY", "User Profile Mode: Out of memory"),
    (1072, "PI_CNTR_PROFILE_WRONG_CLUSTER", "User Profile Mode: Cluster is not assigned to this axis"),
    (1073, "PI_CNTR_PROFILE_UNKNOWN_CLUSTER_IDENTIFIER", "Unknown cluster identifier"),
    (2000, "PI_CNTR_ALREADY_HAS_SERIAL_NUMBER", "Controller already has a serial number"),
    (4000, "PI_CNTR_SECTOR_ERASE_FAILED", "Sector erase failed"),
    (4001, "PI_CNTR_FLASH_PROGRAM_FAILED", "Flash program failed"),
    (4002, "PI_CNTR_FLASH_READ_FAILED", "Flash read failed"),
    (4003, "PI_CNTR_HW_MATCHCODE_ERROR", "HW match code missing/invalid"),
    (4004, "PI_CNTR_FW_MATCHCODE_ERROR", "FW match code missing/invalid"),
    (4005, "PI_CNTR_HW_VERSION_ERROR", "HW version missing/invalid"),
    (4006, "PI_CNTR_FW_VERSION_ERROR", "FW version missing/invalid"),
    (4007, "PI_CNTR_FW_UPDATE_ERROR", "FW update failed"),
    (4008, "PI_CNTR_FW_CRC_PAR_ERROR", "FW Parameter CRC wrong"),
    (4009, "PI_CNTR_FW_CRC_FW_ERROR", "FW CRC wrong"),
    (5000, "PI_CNTR_INVALID_PCC_SCAN_DATA", "PicoCompensation scan data is not valid"),
    (5001, "PI_CNTR_PCC_SCAN_RUNNING", "PicoCompensation is running, some actions can not be executed during scanning/recording"),
    (5002, "PI_CNTR_INVALID_PCC_AXIS", "Given axis can not be defined as PPC axis"),
    (5003, "PI_CNTR_PCC_SCAN_OUT_OF_RANGE", "Defined scan area is larger than the travel range"),
    (5004, "PI_CNTR_PCC_TYPE_NOT_EXISTING", "Given PicoCompensation type is not defined"),
    (5005, "PI_CNTR_PCC_PAM_ERROR", "PicoCompensation parameter error"),
    (5006, "PI_CNTR_PCC_TABLE_ARRAY_TOO_LARGE", "PicoCompensation table is larger than maximum table length"),
    (5100, "PI_CNTR_NEXLINE_ERROR", "Common error in Nexline firmware module"),
    (5101, "PI_CNTR_CHANNEL_ALREADY_USED", "Output channel for Nexline can not be redefined for other usage"),
    (5102, "PI_CNTR_NEXLINE_TABLE_TOO_SMALL", "Memory for Nexline signals is too small"),
    (5103, "PI_CNTR_RNP_WITH_SERVO_ON", "RNP can not be executed if axis is in closed loop"),
    (5104, "PI_CNTR_RNP_NEEDED", "relax procedure (RNP) needed"),
    (5200, "PI_CNTR_AXIS_NOT_CONFIGURED", "Axis must be configured for this action"),
];
